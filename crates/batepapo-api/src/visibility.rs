use batepapo_types::BROADCAST_RECIPIENT;
use batepapo_types::models::{Message, MessageKind};

/// Whether `viewer` may read `message`.
///
/// Broadcasts, public messages, and anything sent by or to the viewer are
/// visible. Private messages reach only their two ends.
pub fn is_visible(message: &Message, viewer: &str) -> bool {
    message.to == BROADCAST_RECIPIENT
        || message.to == viewer
        || message.from == viewer
        || message.kind == MessageKind::Message
}

/// Filter `all` down to what `viewer` may read, keeping insertion order, then
/// keep only the last `limit` entries when a limit is given.
pub fn visible_messages(all: Vec<Message>, viewer: &str, limit: Option<usize>) -> Vec<Message> {
    let mut visible: Vec<Message> = all
        .into_iter()
        .filter(|m| is_visible(m, viewer))
        .collect();

    if let Some(n) = limit {
        let skip = visible.len().saturating_sub(n);
        visible.drain(..skip);
    }

    visible
}
