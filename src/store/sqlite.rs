use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use crate::app::{FeedmailError, Result};
use crate::store::SeenStore;

/// Seen-item ledger in a single SQLite file.
///
/// The connection is closed by [`SeenStore::close`] or, failing that, when the
/// store is dropped.
pub struct SqliteStore {
    conn: Mutex<Option<Connection>>,
}

impl SqliteStore {
    /// Opens the ledger at `path`, creating the file and schema if needed.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(mut conn: Connection) -> Result<Self> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);
        migrations.to_latest(&mut conn)?;

        Ok(Self {
            conn: Mutex::new(Some(conn)),
        })
    }

    fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let guard = self.conn.lock().map_err(|e| {
            FeedmailError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })?;
        let conn = guard
            .as_ref()
            .ok_or_else(|| FeedmailError::Other("seen store is closed".into()))?;

        Ok(f(conn)?)
    }

    /// Number of recorded identifiers.
    pub fn len(&self) -> Result<u64> {
        let count: i64 = self.with_conn(|conn| {
            conn.query_row("SELECT COUNT(*) FROM seen_items", [], |row| row.get(0))
        })?;
        Ok(count as u64)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl SeenStore for SqliteStore {
    fn contains(&self, id: &str) -> Result<bool> {
        let found = self.with_conn(|conn| {
            conn.query_row(
                "SELECT 1 FROM seen_items WHERE key = ?1",
                params![id.as_bytes()],
                |_| Ok(()),
            )
            .optional()
        })?;

        Ok(found.is_some())
    }

    fn mark_seen(&self, id: &str) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR IGNORE INTO seen_items (key) VALUES (?1)",
                params![id.as_bytes()],
            )
        })?;

        Ok(())
    }

    fn close(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FeedmailError::Other(format!("seen store lock poisoned: {}", e)))?
            .take();

        match conn {
            Some(conn) => conn.close().map_err(|(_, e)| FeedmailError::Database(e)),
            None => Ok(()),
        }
    }
}
