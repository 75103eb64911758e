// Error taxonomy for the classification pipeline.
//
// Every variant here is recovered somewhere except ModelLoadError, which
// stops the process at startup. Recovery happens at the component boundary
// that owns the failure: the translation gateway swallows TranslationError,
// the pipeline swallows InferenceError, the statistics store swallows
// PersistenceError.

use std::path::PathBuf;

use thiserror::Error;

/// A translation or language-detection request failed.
#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("translation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected translation response: {0}")]
    Malformed(String),

    #[error("translator unavailable: {0}")]
    Unavailable(String),
}

/// The model artifact could not be loaded. Fatal at startup.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to load model from {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

/// A single inference call failed. The pipeline falls back to the lexicon.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference runtime error: {0}")]
    Runtime(String),

    #[error("model produced an empty output tensor")]
    EmptyOutput,

    #[error("output shape {shape:?} does not match {len} values")]
    ShapeMismatch { shape: Vec<usize>, len: usize },

    #[error("inference task failed: {0}")]
    Task(String),
}

/// A statistics read or write failed.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("invalid stored value: {0}")]
    InvalidValue(String),
}
