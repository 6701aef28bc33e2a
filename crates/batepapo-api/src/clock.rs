use chrono::{DateTime, Local};

/// Epoch milliseconds, the unit stored in `Participant::last_status`.
pub fn millis(now: DateTime<Local>) -> i64 {
    now.timestamp_millis()
}

/// Wall-clock `HH:MM:SS` stamped on every message.
pub fn message_time(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}
