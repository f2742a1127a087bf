pub mod sqlite;

use crate::app::Result;

pub use sqlite::SqliteStore;

/// Ledger of item identifiers that have already been notified.
pub trait SeenStore {
    /// Whether `id` has been recorded. A missing key is `Ok(false)`, not an error.
    fn contains(&self, id: &str) -> Result<bool>;

    /// Records `id`. Recording an identifier twice is a no-op.
    fn mark_seen(&self, id: &str) -> Result<()>;

    /// Flushes and releases the underlying storage. Later calls fail.
    fn close(&self) -> Result<()> {
        Ok(())
    }
}
