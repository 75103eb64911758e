// Lexicon scoring: word counts plus a polarity tie-breaker.
//
// Input is text already normalized into the working language. Each token is
// lower-cased, stripped of surrounding punctuation and run through the
// profanity censor; positive-list hits count as positive evidence, while
// masked tokens and negative-list hits count as negative. Profanity anywhere
// in the text adds a fixed penalty. That check sees only the normalized text;
// the pipeline screens the raw input before scoring. The decision rule then
// checks negative first, positive second, neutral last.

use std::sync::Arc;

use tracing::debug;

use super::polarity::PolarityEstimator;
use super::words::WordLists;
use crate::db::models::{clamp_confidence, Sentiment};
use crate::profanity::ProfanityDetector;
use crate::translation::TranslationGateway;

/// Added to the negative count when the text contains profanity.
pub const PROFANITY_PENALTY: u32 = 2;

/// Polarity beyond +/- this overrides a count tie.
pub const POLARITY_THRESHOLD: f64 = 0.3;

/// Word-count evidence for one text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordTally {
    pub positive_count: u32,
    pub negative_count: u32,
    /// Positive tokens in text order, as they appeared after stripping.
    pub positive_words: Vec<String>,
}

/// The lexicon's opinion of one text.
#[derive(Debug, Clone, PartialEq)]
pub struct LexiconVerdict {
    pub label: Sentiment,
    pub confidence: f64,
    pub positive_words: Vec<String>,
    /// Back-translations of `positive_words`, same length and order.
    pub translations: Vec<String>,
    pub positive_count: u32,
    pub negative_count: u32,
}

/// Where evidence words get back-translated to for display.
#[derive(Debug, Clone, Copy)]
pub struct BackTranslation<'a> {
    pub dest: &'a str,
    pub src: &'a str,
}

pub struct LexiconScorer {
    words: Arc<WordLists>,
    profanity: Arc<ProfanityDetector>,
    polarity: Arc<dyn PolarityEstimator>,
}

impl LexiconScorer {
    pub fn new(
        words: Arc<WordLists>,
        profanity: Arc<ProfanityDetector>,
        polarity: Arc<dyn PolarityEstimator>,
    ) -> Self {
        Self {
            words,
            profanity,
            polarity,
        }
    }

    /// Count positive and negative evidence in `normalized`, the text in
    /// the working language.
    pub fn tally(&self, normalized: &str) -> WordTally {
        let mut tally = WordTally::default();
        let lowered = normalized.to_lowercase();

        for token in lowered.split_whitespace().map(strip_punctuation) {
            if token.is_empty() {
                continue;
            }

            let censored = self.profanity.censor(token);
            if self.words.is_positive(&censored) {
                tally.positive_count += 1;
                tally.positive_words.push(token.to_string());
            }
            if censored != token || self.words.is_negative(token) {
                tally.negative_count += 1;
            }
        }

        if self.profanity.contains_profanity(normalized) {
            tally.negative_count += PROFANITY_PENALTY;
        }

        tally
    }

    /// Score `text` without back-translating the evidence.
    pub fn evaluate(&self, text: &str) -> LexiconVerdict {
        let tally = self.tally(text);
        let polarity = self.polarity.polarity(text);
        let (label, confidence) = decide(tally.positive_count, tally.negative_count, polarity);

        debug!(
            positive = tally.positive_count,
            negative = tally.negative_count,
            polarity,
            label = %label,
            confidence,
            "Lexicon verdict"
        );

        LexiconVerdict {
            label,
            confidence,
            translations: tally.positive_words.clone(),
            positive_words: tally.positive_words,
            positive_count: tally.positive_count,
            negative_count: tally.negative_count,
        }
    }

    /// Score `text` and back-translate the evidence words for display.
    pub async fn score(
        &self,
        text: &str,
        gateway: &TranslationGateway,
        back: BackTranslation<'_>,
    ) -> LexiconVerdict {
        let mut verdict = self.evaluate(text);
        verdict.translations = gateway
            .translate_words(&verdict.positive_words, back.dest, Some(back.src))
            .await;
        verdict
    }
}

/// The decision rule, evaluated in order: negative, positive, neutral.
pub fn decide(positive_count: u32, negative_count: u32, polarity: f64) -> (Sentiment, f64) {
    let positive = f64::from(positive_count);
    let negative = f64::from(negative_count);

    if negative_count > positive_count || polarity < -POLARITY_THRESHOLD {
        (
            Sentiment::Negative,
            clamp_confidence(0.6 + (negative - positive) / 10.0),
        )
    } else if positive_count > negative_count || polarity > POLARITY_THRESHOLD {
        (
            Sentiment::Positive,
            clamp_confidence(0.6 + (positive - negative)),
        )
    } else {
        (
            Sentiment::Neutral,
            clamp_confidence(0.7 + (positive - negative)),
        )
    }
}

fn strip_punctuation(token: &str) -> &str {
    token.trim_matches(|c: char| {
        c.is_ascii_punctuation() || matches!(c, '“' | '”' | '‘' | '’' | '…' | '«' | '»')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Polarity stub returning a fixed value.
    struct FixedPolarity(f64);

    impl PolarityEstimator for FixedPolarity {
        fn polarity(&self, _text: &str) -> f64 {
            self.0
        }
    }

    fn scorer(polarity: f64) -> LexiconScorer {
        LexiconScorer::new(
            Arc::new(WordLists::builtin()),
            Arc::new(ProfanityDetector::default()),
            Arc::new(FixedPolarity(polarity)),
        )
    }

    #[test]
    fn test_tally_strips_punctuation_and_records_evidence() {
        let tally = scorer(0.0).tally("Great!! The screen is (excellent), really GOOD.");
        assert_eq!(tally.positive_count, 3);
        assert_eq!(tally.negative_count, 0);
        assert_eq!(tally.positive_words, vec!["great", "excellent", "good"]);
    }

    #[test]
    fn test_tally_counts_negative_words_and_profanity() {
        let tally = scorer(0.0).tally("terrible service, stupid staff");
        // terrible (negative list) + stupid (masked) + penalty
        assert_eq!(tally.negative_count, 1 + 1 + PROFANITY_PENALTY);
        assert_eq!(tally.positive_count, 0);
    }

    #[test]
    fn test_tally_penalizes_profanity_joined_by_punctuation() {
        let tally = scorer(0.0).tally("great,shit");
        // The joined token is masked and the penalty still applies
        assert_eq!(tally.positive_count, 0);
        assert_eq!(tally.negative_count, 1 + PROFANITY_PENALTY);
    }

    #[test]
    fn test_terrible_product_scenario() {
        let verdict = scorer(-1.0).evaluate("this is a terrible product");
        assert_eq!(verdict.negative_count, 1);
        assert_eq!(verdict.positive_count, 0);
        assert_eq!(verdict.label, Sentiment::Negative);
        assert!((verdict.confidence - 0.7).abs() < 1e-9);
        assert!(verdict.positive_words.is_empty());
    }

    #[test]
    fn test_decide_negative_by_count() {
        let (label, confidence) = decide(1, 4, 0.0);
        assert_eq!(label, Sentiment::Negative);
        assert!((confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_decide_negative_by_polarity_despite_positive_words() {
        // Polarity wins the first branch; the count difference lowers confidence
        let (label, confidence) = decide(3, 1, -0.5);
        assert_eq!(label, Sentiment::Negative);
        assert!((confidence - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_decide_positive_confidence_uses_full_difference() {
        let (label, confidence) = decide(1, 0, 0.0);
        assert_eq!(label, Sentiment::Positive);
        assert!((confidence - 0.99).abs() < 1e-9);
    }

    #[test]
    fn test_decide_positive_by_polarity_on_tie() {
        let (label, confidence) = decide(0, 0, 0.5);
        assert_eq!(label, Sentiment::Positive);
        assert!((confidence - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_decide_neutral() {
        let (label, confidence) = decide(2, 2, 0.3);
        assert_eq!(label, Sentiment::Neutral);
        assert!((confidence - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_decide_clamps_low_confidence_to_zero() {
        let (_, confidence) = decide(20, 0, -0.9);
        assert_eq!(confidence, 0.0);
    }

    #[test]
    fn test_evaluate_without_translation_keeps_words() {
        let verdict = scorer(0.0).evaluate("lovely");
        assert_eq!(verdict.translations, verdict.positive_words);
    }
}
