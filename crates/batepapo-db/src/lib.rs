pub mod migrations;
pub mod models;
pub mod queries;
pub mod store;

pub use store::ChatStore;

use anyhow::Result;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Path value that selects a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> Result<Self> {
        if path.as_os_str() == IN_MEMORY {
            return Self::open_in_memory();
        }

        let conn = Connection::open(path)?;

        // WAL mode for concurrent reads
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        migrations::run(&conn)?;

        info!("Database opened at {} (journal_mode={})", path.display(), mode);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        migrations::run(&conn)?;

        info!("In-memory database opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))?;
        f(&conn)
    }
}
