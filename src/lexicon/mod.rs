// Lexicon-based sentiment: vocabularies, polarity estimate and the scorer
// that combines them with the profanity detector.

pub mod polarity;
pub mod scorer;
pub mod words;

pub use polarity::{PatternPolarity, PolarityEstimator};
pub use scorer::{BackTranslation, LexiconScorer, LexiconVerdict};
pub use words::WordLists;
