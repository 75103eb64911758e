// SqliteStatisticsStore: rusqlite backend implementing StatisticsStore.
//
// Each operation opens its own connection on a blocking thread, so readers
// and the writer hold independent transactions and SQLite's busy timeout
// (not an application mutex) arbitrates the write lock. No lock is held
// while the pipeline translates or runs inference: append is only called
// once a result exists.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Local;
use rusqlite::Connection;
use tracing::{debug, error};

use super::models::{ClassificationResult, DailyStatistic, RawRecord};
use super::queries;
use super::traits::StatisticsStore;
use crate::output::truncate_chars;

/// Default busy timeout: how long a writer waits for the lock.
pub const DEFAULT_BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

pub struct SqliteStatisticsStore {
    db_path: PathBuf,
    busy_timeout: Duration,
}

impl SqliteStatisticsStore {
    /// Point the store at an initialized database file.
    pub fn new(db_path: impl Into<PathBuf>, busy_timeout: Duration) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout,
        }
    }

    /// Run `work` against a fresh connection on the blocking pool.
    async fn with_connection<T, F>(&self, work: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
    {
        let path = self.db_path.clone();
        let timeout = self.busy_timeout;
        tokio::task::spawn_blocking(move || {
            let mut conn = super::open(&path, timeout)?;
            work(&mut conn)
        })
        .await
        .context("Database task panicked")?
    }

    /// Seed a week of demo rollups if the table is empty.
    pub async fn seed_demo(&self) -> Result<bool> {
        let today = Local::now().date_naive();
        self.with_connection(move |conn| Ok(queries::seed_demo_statistics(conn, today)?))
            .await
    }

    /// The most recent audit log rows, newest first.
    pub async fn recent_results(&self, limit: u32) -> Result<Vec<RawRecord>> {
        self.with_connection(move |conn| Ok(queries::recent_results(conn, limit)?))
            .await
    }

    /// Number of rows in the audit log.
    pub async fn count_results(&self) -> Result<i64> {
        self.with_connection(|conn| Ok(queries::count_results(conn)?))
            .await
    }
}

#[async_trait]
impl StatisticsStore for SqliteStatisticsStore {
    async fn append(&self, text: &str, result: &ClassificationResult) -> bool {
        let text_owned = text.to_string();
        let result_owned = result.clone();
        let date = Local::now().date_naive();

        let outcome = self
            .with_connection(move |conn| {
                Ok(queries::append_result(
                    conn,
                    &text_owned,
                    &result_owned,
                    date,
                )?)
            })
            .await;

        match outcome {
            Ok(()) => {
                debug!(
                    label = %result.label(),
                    text_preview = %truncate_chars(text, 30),
                    "Result stored"
                );
                true
            }
            Err(e) => {
                error!(error = %e, db = %self.db_path.display(), "Failed to store result");
                false
            }
        }
    }

    async fn recent(&self, limit: u32) -> Vec<DailyStatistic> {
        match self
            .with_connection(move |conn| Ok(queries::recent_statistics(conn, limit)?))
            .await
        {
            Ok(rows) => rows,
            Err(e) => {
                error!(error = %e, db = %self.db_path.display(), "Failed to read statistics");
                Vec::new()
            }
        }
    }
}
