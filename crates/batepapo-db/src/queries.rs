use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::warn;

use batepapo_types::models::{Message, Participant};

use crate::Database;
use crate::models::{MessageRow, ParticipantRow};
use crate::store::ChatStore;

impl ChatStore for Database {
    // -- Participants --

    fn find_participant(&self, name: &str) -> Result<Option<Participant>> {
        self.with_conn(|conn| query_participant(conn, name))
    }

    fn insert_participant(&self, participant: &Participant) -> Result<bool> {
        self.with_conn(|conn| {
            // The primary key rejects duplicates; a concurrent registration that
            // slipped past the caller's lookup lands here as zero changes.
            let changed = conn.execute(
                "INSERT OR IGNORE INTO participants (name, last_status) VALUES (?1, ?2)",
                params![participant.name, participant.last_status],
            )?;
            Ok(changed == 1)
        })
    }

    fn list_participants(&self) -> Result<Vec<Participant>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT name, last_status FROM participants ORDER BY rowid")?;
            let rows = stmt
                .query_map([], map_participant)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows.into_iter().map(Participant::from).collect())
        })
    }

    fn touch_participant(&self, name: &str, last_status: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE participants SET last_status = ?2 WHERE name = ?1",
                params![name, last_status],
            )?;
            Ok(changed > 0)
        })
    }

    fn find_stale_participants(&self, cutoff: i64) -> Result<Vec<Participant>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT name, last_status FROM participants
                 WHERE last_status <= ?1
                 ORDER BY rowid",
            )?;
            let rows = stmt
                .query_map([cutoff], map_participant)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows.into_iter().map(Participant::from).collect())
        })
    }

    fn delete_stale_participants(&self, cutoff: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let deleted =
                conn.execute("DELETE FROM participants WHERE last_status <= ?1", [cutoff])?;
            Ok(deleted)
        })
    }

    // -- Messages --

    fn insert_message(&self, message: &Message) -> Result<()> {
        self.with_conn(|conn| {
            insert_message_row(conn, message)?;
            Ok(())
        })
    }

    fn insert_messages(&self, messages: &[Message]) -> Result<()> {
        if messages.is_empty() {
            return Ok(());
        }

        self.with_conn(|conn| {
            let tx = conn.unchecked_transaction()?;
            for message in messages {
                insert_message_row(&tx, message)?;
            }
            tx.commit()?;
            Ok(())
        })
    }

    fn list_messages(&self) -> Result<Vec<Message>> {
        let rows = self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, sender, recipient, text, kind, time FROM messages ORDER BY id",
            )?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(MessageRow {
                        id: row.get(0)?,
                        sender: row.get(1)?,
                        recipient: row.get(2)?,
                        text: row.get(3)?,
                        kind: row.get(4)?,
                        time: row.get(5)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })?;

        let messages = rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                Message::try_from(row)
                    .map_err(|e| warn!("Skipping corrupt message {}: {}", id, e))
                    .ok()
            })
            .collect();

        Ok(messages)
    }
}

fn map_participant(row: &rusqlite::Row<'_>) -> rusqlite::Result<ParticipantRow> {
    Ok(ParticipantRow {
        name: row.get(0)?,
        last_status: row.get(1)?,
    })
}

fn query_participant(conn: &Connection, name: &str) -> Result<Option<Participant>> {
    let row = conn
        .query_row(
            "SELECT name, last_status FROM participants WHERE name = ?1",
            [name],
            map_participant,
        )
        .optional()?;

    Ok(row.map(Participant::from))
}

fn insert_message_row(conn: &Connection, message: &Message) -> Result<()> {
    conn.execute(
        "INSERT INTO messages (sender, recipient, text, kind, time) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            message.from,
            message.to,
            message.text,
            message.kind.as_str(),
            message.time
        ],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use batepapo_types::models::MessageKind;

    fn db() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn participant(name: &str, last_status: i64) -> Participant {
        Participant { name: name.into(), last_status }
    }

    fn chat(from: &str, to: &str, text: &str) -> Message {
        Message {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            kind: MessageKind::Message,
            time: "09:30:00".into(),
        }
    }

    #[test]
    fn duplicate_participant_is_not_inserted() {
        let db = db();
        assert!(db.insert_participant(&participant("Ana", 1)).unwrap());
        assert!(!db.insert_participant(&participant("Ana", 2)).unwrap());

        let stored = db.find_participant("Ana").unwrap().unwrap();
        assert_eq!(stored.last_status, 1);
        assert_eq!(db.list_participants().unwrap().len(), 1);
    }

    #[test]
    fn touch_updates_only_known_participants() {
        let db = db();
        db.insert_participant(&participant("Ana", 1)).unwrap();

        assert!(db.touch_participant("Ana", 50).unwrap());
        assert!(!db.touch_participant("Bia", 50).unwrap());
        assert_eq!(db.find_participant("Ana").unwrap().unwrap().last_status, 50);
        assert!(db.find_participant("Bia").unwrap().is_none());
    }

    #[test]
    fn stale_queries_include_the_cutoff() {
        let db = db();
        db.insert_participant(&participant("old", 100)).unwrap();
        db.insert_participant(&participant("edge", 200)).unwrap();
        db.insert_participant(&participant("fresh", 201)).unwrap();

        let stale: Vec<String> = db
            .find_stale_participants(200)
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(stale, vec!["old", "edge"]);

        assert_eq!(db.delete_stale_participants(200).unwrap(), 2);
        let left = db.list_participants().unwrap();
        assert_eq!(left, vec![participant("fresh", 201)]);
    }

    #[test]
    fn messages_come_back_in_insertion_order() {
        let db = db();
        db.insert_message(&chat("Ana", "Todos", "um")).unwrap();
        db.insert_messages(&[chat("Bia", "Todos", "dois"), chat("Ana", "Bia", "tres")])
            .unwrap();
        db.insert_messages(&[]).unwrap();

        let texts: Vec<String> = db.list_messages().unwrap().into_iter().map(|m| m.text).collect();
        assert_eq!(texts, vec!["um", "dois", "tres"]);
    }

    #[test]
    fn status_messages_keep_their_kind() {
        let db = db();
        db.insert_message(&Message::joined("Ana", "08:00:00")).unwrap();

        let stored = db.list_messages().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].kind, MessageKind::Status);
        assert_eq!(stored[0].to, "Todos");
    }
}
