// Continuous polarity estimate in [-1, 1], used as a tie-breaker next to
// the word counts.
//
// PatternPolarity averages the polarity of known adjectives/verbs in the
// text. A negation word flips and dampens the next scored word (x -0.5);
// an intensifier scales it. Text with no scored word is 0.0.

use std::collections::HashMap;

pub trait PolarityEstimator: Send + Sync {
    /// Polarity of `text`, from -1.0 (negative) to 1.0 (positive).
    fn polarity(&self, text: &str) -> f64;
}

const POLARITY_TABLE: &[(&str, f64)] = &[
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("awesome", 1.0),
    ("wonderful", 1.0),
    ("amazing", 0.6),
    ("fantastic", 0.4),
    ("perfect", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("lovely", 0.5),
    ("beautiful", 0.85),
    ("brilliant", 0.9),
    ("happy", 0.8),
    ("glad", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("like", 0.2),
    ("enjoyable", 0.4),
    ("pleasant", 0.73),
    ("impressive", 1.0),
    ("satisfied", 0.5),
    ("fine", 0.42),
    ("helpful", 0.3),
    ("recommend", 0.3),
    ("bad", -0.7),
    ("worse", -0.4),
    ("worst", -1.0),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("poor", -0.4),
    ("disappointing", -0.6),
    ("disappointed", -0.75),
    ("sad", -0.5),
    ("angry", -0.5),
    ("hate", -0.8),
    ("annoying", -0.8),
    ("boring", -1.0),
    ("broken", -0.4),
    ("useless", -0.5),
    ("slow", -0.3),
    ("ugly", -0.7),
    ("mediocre", -0.5),
    ("pathetic", -1.0),
    ("rude", -0.3),
    ("wrong", -0.5),
    ("waste", -0.2),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "n't", "dont", "don't", "isn't", "wasn't"];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("too", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
];

const NEGATION_FACTOR: f64 = -0.5;

pub struct PatternPolarity {
    table: HashMap<&'static str, f64>,
}

impl Default for PatternPolarity {
    fn default() -> Self {
        Self {
            table: POLARITY_TABLE.iter().copied().collect(),
        }
    }
}

impl PolarityEstimator for PatternPolarity {
    fn polarity(&self, text: &str) -> f64 {
        let mut total = 0.0;
        let mut scored = 0usize;
        let mut modifier = 1.0;

        for raw in text.split_whitespace() {
            let token = raw
                .trim_matches(|c: char| c.is_ascii_punctuation() && c != '\'')
                .to_lowercase();
            if token.is_empty() {
                continue;
            }

            if NEGATIONS.contains(&token.as_str()) || token.ends_with("n't") {
                modifier *= NEGATION_FACTOR;
                continue;
            }
            if let Some((_, factor)) = INTENSIFIERS.iter().find(|(w, _)| *w == token) {
                modifier *= factor;
                continue;
            }

            if let Some(&value) = self.table.get(token.as_str()) {
                total += (value * modifier).clamp(-1.0, 1.0);
                scored += 1;
            }
            // Modifiers bind to the next word only
            modifier = 1.0;
        }

        if scored == 0 {
            return 0.0;
        }
        (total / scored as f64).clamp(-1.0, 1.0)
    }
}
