//! Inactivity reaper.
//!
//! Participants that have not pinged `/status` within the timeout are dropped
//! from the roster and a "left" notice is broadcast for each of them.
//!
//! A sweep is three separate store calls: find stale, delete stale, insert
//! notices. All three use one cutoff, but a participant who pings between the
//! find and the delete can still be removed without ever being listed. That
//! window is accepted.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use batepapo_db::ChatStore;
use batepapo_types::models::Message;

use crate::clock;

pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(15);
pub const DEFAULT_INACTIVE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceConfig {
    /// Time between sweeps. Must be non-zero.
    pub sweep_interval: Duration,
    /// How long a participant may stay silent before eviction.
    pub inactive_timeout: Duration,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            inactive_timeout: DEFAULT_INACTIVE_TIMEOUT,
        }
    }
}

/// Background task that evicts inactive participants forever.
///
/// The first sweep runs one interval after start. Errors are logged and the
/// schedule carries on.
pub async fn run_presence_loop(store: Arc<dyn ChatStore>, config: PresenceConfig) {
    let mut interval =
        tokio::time::interval_at(Instant::now() + config.sweep_interval, config.sweep_interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let store = store.clone();
        let timeout = config.inactive_timeout;
        let outcome =
            tokio::task::spawn_blocking(move || sweep(store.as_ref(), Local::now(), timeout)).await;

        match outcome {
            Ok(Ok(count)) => {
                if count > 0 {
                    info!("Presence: evicted {} inactive participants", count);
                }
            }
            Ok(Err(e)) => {
                warn!("Presence sweep error: {:#}", e);
            }
            Err(e) => {
                warn!("Presence sweep task failed: {}", e);
            }
        }
    }
}

/// Run one sweep at `now`. Returns how many participants were found stale.
pub fn sweep(
    store: &dyn ChatStore,
    now: DateTime<Local>,
    inactive_timeout: Duration,
) -> anyhow::Result<usize> {
    let timeout_ms = i64::try_from(inactive_timeout.as_millis()).unwrap_or(i64::MAX);
    let cutoff = clock::millis(now).saturating_sub(timeout_ms);

    let stale = store.find_stale_participants(cutoff)?;
    if stale.is_empty() {
        return Ok(0);
    }

    let time = clock::message_time(now);
    let notices: Vec<Message> = stale
        .iter()
        .map(|p| Message::left(&p.name, time.clone()))
        .collect();

    let removed = store.delete_stale_participants(cutoff)?;
    if removed != stale.len() {
        debug!(
            "Presence: found {} stale participants but deleted {}",
            stale.len(),
            removed
        );
    }

    store.insert_messages(&notices)?;

    Ok(stale.len())
}
