// Statistics store trait: the only owner of persisted state.
//
// Neither method returns an error: a failed write is a `false`, a failed
// read is an empty list. Implementations log the underlying failure.

use async_trait::async_trait;

use super::models::{ClassificationResult, DailyStatistic};

/// Default number of days returned by `recent`.
pub const DEFAULT_STATISTICS_LIMIT: u32 = 7;

#[async_trait]
pub trait StatisticsStore: Send + Sync {
    /// Record a classification in the audit log and today's rollup, in one
    /// exclusive transaction. Returns false if the write failed.
    async fn append(&self, text: &str, result: &ClassificationResult) -> bool;

    /// The most recent `limit` daily rollups, newest first.
    async fn recent(&self, limit: u32) -> Vec<DailyStatistic>;
}
