use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS participants (
            name        TEXT PRIMARY KEY,
            last_status INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_participants_last_status
            ON participants(last_status);

        CREATE TABLE IF NOT EXISTS messages (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            sender      TEXT NOT NULL,
            recipient   TEXT NOT NULL,
            text        TEXT NOT NULL,
            kind        TEXT NOT NULL
                        CHECK (kind IN ('message', 'private_message', 'status')),
            time        TEXT NOT NULL
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
