/// Database row types. These map directly to SQLite rows and stay separate
/// from the wire types in batepapo-types.
use batepapo_types::models::{Message, MessageKind, Participant, UnknownMessageKind};

pub struct ParticipantRow {
    pub name: String,
    pub last_status: i64,
}

impl From<ParticipantRow> for Participant {
    fn from(row: ParticipantRow) -> Self {
        Participant {
            name: row.name,
            last_status: row.last_status,
        }
    }
}

pub struct MessageRow {
    pub id: i64,
    pub sender: String,
    pub recipient: String,
    pub text: String,
    pub kind: String,
    pub time: String,
}

impl TryFrom<MessageRow> for Message {
    type Error = UnknownMessageKind;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        let kind: MessageKind = row.kind.parse()?;
        Ok(Message {
            from: row.sender,
            to: row.recipient,
            text: row.text,
            kind,
            time: row.time,
        })
    }
}
