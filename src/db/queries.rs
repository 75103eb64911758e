// Database queries: every SQL statement the store runs lives here.
//
// Functions take a Connection directly so they can be tested against an
// in-memory database. Writes and reads each run inside their own
// transaction: writes take an exclusive lock up front, reads use a deferred
// (snapshot) transaction.

use chrono::{Duration, NaiveDate, SecondsFormat};
use rusqlite::{params, Connection, TransactionBehavior};

use super::models::{ClassificationResult, DailyStatistic, RawRecord, Sentiment};
use crate::error::PersistenceError;

type Result<T> = std::result::Result<T, PersistenceError>;

const DATE_FORMAT: &str = "%Y-%m-%d";

// --- Writes ---

/// Record one classification: insert the audit row and bump the day's
/// rollup, atomically.
pub fn append_result(
    conn: &mut Connection,
    text: &str,
    result: &ClassificationResult,
    date: NaiveDate,
) -> Result<()> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Exclusive)?;

    tx.execute(
        "INSERT INTO raw_results (text, label, confidence, timestamp) VALUES (?1, ?2, ?3, ?4)",
        params![
            text,
            result.label().as_str(),
            result.confidence(),
            result
                .timestamp()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ],
    )?;

    let (positive, neutral, negative) = increments(result.label());
    tx.execute(
        "INSERT INTO daily_statistics (date, positive, neutral, negative, total)
         VALUES (?1, ?2, ?3, ?4, 1)
         ON CONFLICT(date) DO UPDATE SET
            positive = COALESCE(positive, 0) + ?2,
            neutral = COALESCE(neutral, 0) + ?3,
            negative = COALESCE(negative, 0) + ?4,
            total = COALESCE(total, 0) + 1",
        params![
            date.format(DATE_FORMAT).to_string(),
            positive,
            neutral,
            negative
        ],
    )?;

    tx.commit()?;
    Ok(())
}

/// One-hot (positive, neutral, negative) increments for a label.
fn increments(label: Sentiment) -> (i64, i64, i64) {
    match label {
        Sentiment::Positive => (1, 0, 0),
        Sentiment::Neutral => (0, 1, 0),
        Sentiment::Negative => (0, 0, 1),
    }
}

/// Fill an empty statistics table with a week of demo rollups ending at
/// `today`. Returns false (and writes nothing) if any rows already exist.
pub fn seed_demo_statistics(conn: &mut Connection, today: NaiveDate) -> Result<bool> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Exclusive)?;

    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM daily_statistics", [], |row| {
        row.get(0)
    })?;
    if existing > 0 {
        return Ok(false);
    }

    for i in 0..7i64 {
        let date = today - Duration::days(6 - i);
        let (positive, neutral, negative) = (i + 1, i + 2, i);
        tx.execute(
            "INSERT INTO daily_statistics (date, positive, neutral, negative, total)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                date.format(DATE_FORMAT).to_string(),
                positive,
                neutral,
                negative,
                positive + neutral + negative
            ],
        )?;
    }

    tx.commit()?;
    Ok(true)
}

// --- Reads ---

/// The most recent `limit` daily rollups, newest first. NULL counts read as 0.
pub fn recent_statistics(conn: &mut Connection, limit: u32) -> Result<Vec<DailyStatistic>> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;

    let rows: Vec<(String, i64, i64, i64, i64)> = {
        let mut stmt = tx.prepare(
            "SELECT date,
                    COALESCE(positive, 0),
                    COALESCE(neutral, 0),
                    COALESCE(negative, 0),
                    COALESCE(total, 0)
             FROM daily_statistics
             ORDER BY date DESC
             LIMIT ?1",
        )?;
        let mapped = stmt.query_map(params![limit], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?;
        let collected = mapped.collect::<rusqlite::Result<Vec<_>>>()?;
        collected
    };
    tx.commit()?;

    rows.into_iter()
        .map(|(date, positive, neutral, negative, total)| {
            let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
                .map_err(|e| PersistenceError::InvalidValue(format!("date {date:?}: {e}")))?;
            Ok(DailyStatistic {
                date,
                positive: non_negative(positive),
                neutral: non_negative(neutral),
                negative: non_negative(negative),
                total: non_negative(total),
            })
        })
        .collect()
}

fn non_negative(value: i64) -> u64 {
    value.max(0) as u64
}

/// The most recent audit rows, newest first.
pub fn recent_results(conn: &Connection, limit: u32) -> Result<Vec<RawRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, text, label, confidence, timestamp
         FROM raw_results
         ORDER BY timestamp DESC, id DESC
         LIMIT ?1",
    )?;

    let rows: Vec<(i64, String, String, f64, String)> = stmt
        .query_map(params![limit], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?))
        })?
        .collect::<rusqlite::Result<_>>()?;

    rows.into_iter()
        .map(|(id, text, label, confidence, timestamp)| {
            let label = label
                .parse::<Sentiment>()
                .map_err(PersistenceError::InvalidValue)?;
            Ok(RawRecord {
                id,
                text,
                label,
                confidence,
                timestamp,
            })
        })
        .collect()
}

/// Number of rows in the audit log.
pub fn count_results(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM raw_results", [], |row| row.get(0))?;
    Ok(count)
}
