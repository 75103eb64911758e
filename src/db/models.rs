// Data models: the types that flow through the pipeline and into storage.
//
// These live next to the database layer (rather than in the pipeline) so the
// store and the visualization layer can use them without depending on the
// classification code.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Highest confidence any classification may report.
pub const MAX_CONFIDENCE: f64 = 0.99;

/// The three sentiment labels. There is deliberately no "unknown" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
        }
    }
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Sentiment::Positive),
            "neutral" => Ok(Sentiment::Neutral),
            "negative" => Ok(Sentiment::Negative),
            other => Err(format!("unknown sentiment label: {other}")),
        }
    }
}

/// Clamp a confidence into the reportable range [0.0, 0.99].
/// NaN collapses to 0.0.
pub fn clamp_confidence(confidence: f64) -> f64 {
    if confidence.is_nan() {
        return 0.0;
    }
    confidence.clamp(0.0, MAX_CONFIDENCE)
}

/// The final answer for one piece of text.
///
/// Fields are private so the confidence clamp and the evidence/translation
/// pairing can't be bypassed; build one with [`ClassificationResult::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    label: Sentiment,
    confidence: f64,
    evidence_words: Vec<String>,
    translations: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl ClassificationResult {
    /// Build a result stamped with the current time.
    ///
    /// `translations` is truncated or padded (with the evidence word itself)
    /// so both sequences always have the same length.
    pub fn new(
        label: Sentiment,
        confidence: f64,
        evidence_words: Vec<String>,
        mut translations: Vec<String>,
    ) -> Self {
        translations.truncate(evidence_words.len());
        for word in evidence_words.iter().skip(translations.len()) {
            translations.push(word.clone());
        }
        Self {
            label,
            confidence: clamp_confidence(confidence),
            evidence_words,
            translations,
            timestamp: Utc::now(),
        }
    }

    /// Blank input: neutral at 0.5 with no evidence.
    pub fn blank() -> Self {
        Self::new(Sentiment::Neutral, 0.5, Vec::new(), Vec::new())
    }

    pub fn label(&self) -> Sentiment {
        self.label
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn evidence_words(&self) -> &[String] {
        &self.evidence_words
    }

    pub fn translations(&self) -> &[String] {
        &self.translations
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// One row of the append-only audit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: i64,
    pub text: String,
    pub label: Sentiment,
    pub confidence: f64,
    pub timestamp: String,
}

/// Per-day rollup. `total == positive + neutral + negative` always holds
/// because the only write path increments a category and the total together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyStatistic {
    pub date: NaiveDate,
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub total: u64,
}

/// Label totals across a window of daily rows, plus the newest day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub positive: u64,
    pub neutral: u64,
    pub negative: u64,
    pub total: u64,
    pub latest: Option<DailyStatistic>,
}

impl StatisticsSummary {
    /// Summarize rows in any order; `latest` is the row with the greatest date.
    pub fn from_rows(rows: &[DailyStatistic]) -> Self {
        let mut summary = Self::default();
        for row in rows {
            summary.positive += row.positive;
            summary.neutral += row.neutral;
            summary.negative += row.negative;
            summary.total += row.total;
        }
        summary.latest = rows.iter().max_by_key(|r| r.date).cloned();
        summary
    }

    /// Share of `label` in the window, 0.0 for an empty window.
    pub fn share(&self, label: Sentiment) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let count = match label {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        };
        count as f64 / self.total as f64
    }
}
