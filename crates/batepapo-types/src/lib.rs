pub mod api;
pub mod models;

/// Recipient value addressing everyone in the room.
pub const BROADCAST_RECIPIENT: &str = "Todos";

/// Text of the status message posted when a participant registers.
pub const JOIN_TEXT: &str = "entra na sala...";

/// Text of the status message posted when the reaper evicts a participant.
pub const LEAVE_TEXT: &str = "sai da sala...";
