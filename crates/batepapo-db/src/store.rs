use anyhow::Result;
use batepapo_types::models::{Message, Participant};

/// The two record collections the chat works against.
///
/// Every method is a single atomic operation on the underlying storage.
/// Callers compose them (registration, the presence sweep) without a wrapping
/// transaction, so multi-step flows can be observed half-done.
pub trait ChatStore: Send + Sync {
    // -- Participants --

    fn find_participant(&self, name: &str) -> Result<Option<Participant>>;

    /// Returns `false` when a participant with the same name already exists.
    fn insert_participant(&self, participant: &Participant) -> Result<bool>;

    fn list_participants(&self) -> Result<Vec<Participant>>;

    /// Sets `last_status` for `name`. Returns `false` if no such participant.
    fn touch_participant(&self, name: &str, last_status: i64) -> Result<bool>;

    /// Participants whose `last_status` is at or before `cutoff`.
    fn find_stale_participants(&self, cutoff: i64) -> Result<Vec<Participant>>;

    /// Deletes participants whose `last_status` is at or before `cutoff`.
    fn delete_stale_participants(&self, cutoff: i64) -> Result<usize>;

    // -- Messages --

    fn insert_message(&self, message: &Message) -> Result<()>;

    fn insert_messages(&self, messages: &[Message]) -> Result<()>;

    /// All messages in insertion order.
    fn list_messages(&self) -> Result<Vec<Message>>;
}
