use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};

use super::SqliteInitError;

/// Bring the schema up to date.
///
/// Version 1 creates the `kv_store` table holding one row per storage key.
pub fn run_migrations(conn: &mut Connection) -> Result<(), SqliteInitError> {
    fn is_applied(conn: &Connection, version: i64) -> Result<bool, rusqlite::Error> {
        let row = conn
            .query_row(
                "SELECT 1 FROM schema_migrations WHERE version = ?1",
                params![version],
                |_| Ok(()),
            )
            .optional()?;
        Ok(row.is_some())
    }

    conn.execute_batch(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
        ",
    )?;

    // Version 1: key-value table.
    if !is_applied(conn, 1)? {
        let tx = conn.transaction()?;

        tx.execute_batch(
            r"
                CREATE TABLE IF NOT EXISTS kv_store (
                    key TEXT PRIMARY KEY,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );
            ",
        )?;

        tx.execute(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
            params![1_i64, Utc::now().to_rfc3339()],
        )?;

        tx.commit()?;
    }

    Ok(())
}
