use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use tracing::debug;

use crate::progress_store::ProgressStore;
use crate::repository::{KeyValueStore, StorageError};

mod migrate;

/// Durable key-value store backed by a single `SQLite` table.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl SqliteStore {
    /// Open (or create) the database file at `path` and migrate it.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the file cannot be opened, the pragmas
    /// cannot be applied, or migrations fail.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SqliteInitError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        debug!(path = %path.display(), "opened progress database");
        Self::from_connection(conn)
    }

    /// Open a private in-memory database, mostly for tests.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if migrations fail.
    pub fn open_in_memory() -> Result<Self, SqliteInitError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, SqliteInitError> {
        conn.busy_timeout(Duration::from_secs(5))?;
        migrate::run_migrations(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Wrap this store in a [`ProgressStore`] under the default key.
    #[must_use]
    pub fn into_progress_store(self) -> ProgressStore {
        ProgressStore::new(Arc::new(self))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .map_err(|err| StorageError::Connection(err.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        conn.execute(
            r"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
            params![key, value, Utc::now().to_rfc3339()],
        )
        .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        conn.execute("DELETE FROM kv_store WHERE key = ?1", params![key])
            .map_err(|err| StorageError::Connection(err.to_string()))?;
        Ok(())
    }
}
