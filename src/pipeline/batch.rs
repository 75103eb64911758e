// Batch classification: many texts through the pipeline at once.
//
// Texts are classified with bounded concurrency and each result is recorded
// as soon as it's ready. Writes still go through the store's exclusive
// transaction one at a time; only translation and inference overlap.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::info;

use super::classifier::SentimentPipeline;
use crate::db::models::Sentiment;

/// Default number of texts in flight.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Per-label counts for one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
    /// Results the store accepted.
    pub recorded: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }

    fn add(&mut self, label: Sentiment, recorded: bool) {
        match label {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
        if recorded {
            self.recorded += 1;
        }
    }
}

/// Classify and record every text in `texts`.
pub async fn run(
    pipeline: &SentimentPipeline,
    texts: Vec<String>,
    concurrency: usize,
) -> BatchSummary {
    let pb = ProgressBar::new(texts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Classifying [{bar:30}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let outcomes: Vec<(Sentiment, bool)> = stream::iter(texts.into_iter().map(|text| {
        let pb = pb.clone();
        async move {
            let result = pipeline.classify(&text).await;
            let recorded = pipeline.record(&text, &result).await;
            pb.inc(1);
            (result.label(), recorded)
        }
    }))
    .buffer_unordered(concurrency.max(1))
    .collect()
    .await;
    pb.finish_and_clear();

    let mut summary = BatchSummary::default();
    for (label, recorded) in outcomes {
        summary.add(label, recorded);
    }

    info!(
        total = summary.total(),
        positive = summary.positive,
        neutral = summary.neutral,
        negative = summary.negative,
        recorded = summary.recorded,
        "Batch complete"
    );
    summary
}
