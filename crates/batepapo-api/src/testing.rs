//! Store wrapper for exercising partial failures in multi-step flows.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Result, anyhow};

use batepapo_db::{ChatStore, Database};
use batepapo_types::models::{Message, Participant};

/// In-memory `Database` with switchable faults. Everything not switched on is
/// passed straight through. Switch faults on with struct update syntax:
/// `FaultyStore { bulk_insert_fails: true, ..FaultyStore::new() }`.
pub struct FaultyStore {
    pub inner: Database,
    /// Number of leading `find_stale_participants` calls that error.
    pub failing_stale_lookups: usize,
    /// `insert_participant` reports a taken name without writing.
    pub insert_reports_taken: bool,
    /// `insert_message` errors.
    pub single_insert_fails: bool,
    /// `insert_messages` errors.
    pub bulk_insert_fails: bool,
    pub stale_lookups: AtomicUsize,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self {
            inner: Database::open_in_memory().unwrap(),
            failing_stale_lookups: 0,
            insert_reports_taken: false,
            single_insert_fails: false,
            bulk_insert_fails: false,
            stale_lookups: AtomicUsize::new(0),
        }
    }

    fn db(&self) -> &Database {
        &self.inner
    }
}

impl ChatStore for FaultyStore {
    fn find_participant(&self, name: &str) -> Result<Option<Participant>> {
        self.db().find_participant(name)
    }

    fn insert_participant(&self, participant: &Participant) -> Result<bool> {
        if self.insert_reports_taken {
            return Ok(false);
        }
        self.db().insert_participant(participant)
    }

    fn list_participants(&self) -> Result<Vec<Participant>> {
        self.db().list_participants()
    }

    fn touch_participant(&self, name: &str, last_status: i64) -> Result<bool> {
        self.db().touch_participant(name, last_status)
    }

    fn find_stale_participants(&self, cutoff: i64) -> Result<Vec<Participant>> {
        let n = self.stale_lookups.fetch_add(1, Ordering::SeqCst);
        if n < self.failing_stale_lookups {
            return Err(anyhow!("participants collection unavailable"));
        }
        self.db().find_stale_participants(cutoff)
    }

    fn delete_stale_participants(&self, cutoff: i64) -> Result<usize> {
        self.db().delete_stale_participants(cutoff)
    }

    fn insert_message(&self, message: &Message) -> Result<()> {
        if self.single_insert_fails {
            return Err(anyhow!("message insert rejected"));
        }
        self.db().insert_message(message)
    }

    fn insert_messages(&self, messages: &[Message]) -> Result<()> {
        if self.bulk_insert_fails {
            return Err(anyhow!("bulk insert rejected"));
        }
        self.db().insert_messages(messages)
    }

    fn list_messages(&self) -> Result<Vec<Message>> {
        self.db().list_messages()
    }
}
