use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{BROADCAST_RECIPIENT, JOIN_TEXT, LEAVE_TEXT};

/// A live chat identity. `last_status` is epoch milliseconds (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(rename = "lastStatus")]
    pub last_status: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Public chat line, visible to everyone.
    Message,
    /// Visible only to sender and addressee.
    PrivateMessage,
    /// Join/leave notice. Only the server creates these.
    Status,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::PrivateMessage => "private_message",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMessageKind(pub String);

impl fmt::Display for UnknownMessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown message type '{}'", self.0)
    }
}

impl std::error::Error for UnknownMessageKind {}

impl FromStr for MessageKind {
    type Err = UnknownMessageKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "private_message" => Ok(Self::PrivateMessage),
            "status" => Ok(Self::Status),
            other => Err(UnknownMessageKind(other.to_string())),
        }
    }
}

/// A chat line as stored and served. `time` is local `HH:MM:SS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub time: String,
}

impl Message {
    /// Broadcast notice that `name` joined the room.
    pub fn joined(name: &str, time: impl Into<String>) -> Self {
        Self::status(name, JOIN_TEXT, time)
    }

    /// Broadcast notice that `name` was dropped for inactivity.
    pub fn left(name: &str, time: impl Into<String>) -> Self {
        Self::status(name, LEAVE_TEXT, time)
    }

    fn status(name: &str, text: &str, time: impl Into<String>) -> Self {
        Self {
            from: name.to_string(),
            to: BROADCAST_RECIPIENT.to_string(),
            text: text.to_string(),
            kind: MessageKind::Status,
            time: time.into(),
        }
    }
}
