// Unit tests for lexicon scoring and profanity detection.
//
// Tests isolated pure functions: the decision rule's branch order and
// confidence formulas, censor/contains_profanity on decorated tokens, and
// how the scorer combines counts, penalty and polarity.

use std::sync::Arc;

use sentiment_fusion::db::models::Sentiment;
use sentiment_fusion::lexicon::scorer::{decide, PROFANITY_PENALTY};
use sentiment_fusion::lexicon::{LexiconScorer, PatternPolarity, WordLists};
use sentiment_fusion::profanity::ProfanityDetector;

fn scorer() -> LexiconScorer {
    LexiconScorer::new(
        Arc::new(WordLists::builtin()),
        Arc::new(ProfanityDetector::default()),
        Arc::new(PatternPolarity::default()),
    )
}

// ============================================================
// ProfanityDetector
// ============================================================

#[test]
fn profanity_detected_through_decoration() {
    let detector = ProfanityDetector::default();
    assert!(detector.contains_profanity("what a load of sh1t!"));
    assert!(detector.contains_profanity("Dasar GOBLOK"));
    assert!(!detector.contains_profanity("this is a terrible product"));
    assert!(!detector.contains_profanity("classic assessment"));
}

#[test]
fn censor_masks_only_flagged_tokens() {
    let detector = ProfanityDetector::default();
    assert_eq!(detector.censor("idiot"), "*****");
    assert_eq!(detector.censor("good"), "good");
}

#[test]
fn extra_words_extend_blocklist() {
    let base = ProfanityDetector::default();
    let extended = ProfanityDetector::new(["Frak"]);
    assert!(!base.contains_profanity("frak this"));
    assert!(extended.contains_profanity("frak this"));
    assert_eq!(extended.len(), base.len() + 1);
}

// ============================================================
// decide: branch order
// ============================================================

#[test]
fn decide_negative_checked_before_positive() {
    // Both branches could match on polarity alone; negative comes first
    let (label, _) = decide(2, 3, 0.9);
    assert_eq!(label, Sentiment::Negative);
}

#[test]
fn decide_confidence_capped() {
    let (label, confidence) = decide(0, 9, 0.0);
    assert_eq!(label, Sentiment::Negative);
    // 0.6 + 0.9 capped
    assert!((confidence - 0.99).abs() < 1e-9);
}

#[test]
fn decide_neutral_on_balanced_counts() {
    let (label, confidence) = decide(0, 0, 0.0);
    assert_eq!(label, Sentiment::Neutral);
    assert!((confidence - 0.7).abs() < 1e-9);
}

// ============================================================
// LexiconScorer
// ============================================================

#[test]
fn terrible_product_is_negative_at_point_seven() {
    let verdict = scorer().evaluate("this is a terrible product");
    assert_eq!(verdict.positive_count, 0);
    assert_eq!(verdict.negative_count, 1);
    assert_eq!(verdict.label, Sentiment::Negative);
    assert!((verdict.confidence - 0.7).abs() < 1e-9);
}

#[test]
fn positive_words_become_evidence_in_order() {
    let verdict = scorer().evaluate("Lovely staff, GREAT food.");
    assert_eq!(verdict.label, Sentiment::Positive);
    assert_eq!(verdict.positive_words, vec!["lovely", "great"]);
    assert_eq!(verdict.translations.len(), verdict.positive_words.len());
}

#[test]
fn profanity_adds_penalty_on_top_of_masked_token() {
    let verdict = scorer().evaluate("great food, stupid waiter");
    assert_eq!(verdict.positive_count, 1);
    assert_eq!(verdict.negative_count, 1 + PROFANITY_PENALTY);
    assert_eq!(verdict.label, Sentiment::Negative);
    assert!((verdict.confidence - 0.8).abs() < 1e-9);
}

#[test]
fn polarity_breaks_a_tie() {
    // "nice" isn't in either list, but its polarity (0.6) is past the threshold
    let verdict = scorer().evaluate("the staff were nice");
    assert_eq!(verdict.positive_count, 0);
    assert_eq!(verdict.negative_count, 0);
    assert_eq!(verdict.label, Sentiment::Positive);
    assert!((verdict.confidence - 0.6).abs() < 1e-9);
}
