// Sentiment Fusion: lexicon + neural sentiment classification
//
// This is the library root. Each module corresponds to a stage of the
// classification pipeline or the statistics store behind it.

pub mod config;
pub mod db;
pub mod error;
pub mod lexicon;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod profanity;
pub mod status;
pub mod translation;
