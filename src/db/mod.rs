// Database layer: SQLite storage for the audit log and daily rollups.
//
// We use rusqlite with the "bundled" feature so there's no system SQLite
// dependency. The database file lives wherever SENTIMENT_DB_PATH points
// (defaults to ./sentiment.db).

pub mod models;
pub mod queries;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use sqlite::SqliteStatisticsStore;
pub use traits::StatisticsStore;

use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// Open (or create) the database and run migrations.
///
/// Called by `sentiment init` and at the start of every command that
/// touches statistics.
pub fn initialize(db_path: &Path, busy_timeout: Duration) -> Result<Connection> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!(
                    "Failed to create directory for database: {}",
                    db_path.display()
                )
            })?;
        }
    }

    let conn = connect(db_path, busy_timeout)?;
    schema::create_tables(&conn)?;

    Ok(conn)
}

/// Open an existing database (fails if it doesn't exist yet).
pub fn open(db_path: &Path, busy_timeout: Duration) -> Result<Connection> {
    if !db_path.exists() {
        anyhow::bail!(
            "Database not found at {}. Run `sentiment init` first.",
            db_path.display()
        );
    }
    connect(db_path, busy_timeout)
}

/// Open a connection with the pragmas every connection needs.
///
/// The busy timeout makes SQLite retry lock acquisition internally instead
/// of failing immediately when another connection holds the write lock.
pub(crate) fn connect(db_path: &Path, busy_timeout: Duration) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    conn.busy_timeout(busy_timeout)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;

    Ok(conn)
}
