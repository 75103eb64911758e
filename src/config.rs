use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::adapter::DEFAULT_MAX_LENGTH;
use crate::translation::google::DEFAULT_TRANSLATE_URL;

/// Which translation backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslatorBackend {
    /// Public Google Translate endpoint (default)
    Google,
    /// Offline: text is assumed to already be in the working language
    None,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// The ONNX sentiment model artifact
    pub model_path: PathBuf,
    /// Encoded sequence length fed to the model
    pub max_length: usize,
    /// Directory holding positive_words.csv / negative_words.csv
    pub wordlist_dir: PathBuf,
    /// Language the lexicon and model work in
    pub working_language: String,
    /// Back-translation target when the input language can't be detected
    pub display_language: String,
    pub translator: TranslatorBackend,
    pub translate_url: String,
    /// How long a statistics write waits for the SQLite lock
    pub busy_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables. Every setting has a
    /// default; only malformed numbers are errors.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment, or a map in
    /// tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let translator = match lookup("SENTIMENT_TRANSLATOR").as_deref() {
            Some("none") => TranslatorBackend::None,
            // "google" or unset
            _ => TranslatorBackend::Google,
        };

        let max_length = match lookup("SENTIMENT_MAX_LENGTH") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| {
                    format!("SENTIMENT_MAX_LENGTH must be a positive integer, got {raw:?}")
                })?,
            None => DEFAULT_MAX_LENGTH,
        };

        let busy_timeout_ms = match lookup("SENTIMENT_BUSY_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().with_context(|| {
                format!("SENTIMENT_BUSY_TIMEOUT_MS must be milliseconds, got {raw:?}")
            })?,
            None => 5000,
        };

        Ok(Self {
            db_path: lookup("SENTIMENT_DB_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./sentiment.db")),
            model_path: lookup("SENTIMENT_MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_model_path),
            max_length,
            wordlist_dir: lookup("SENTIMENT_WORDLIST_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            working_language: lookup("SENTIMENT_WORKING_LANG").unwrap_or_else(|| "en".to_string()),
            display_language: lookup("SENTIMENT_DISPLAY_LANG").unwrap_or_else(|| "id".to_string()),
            translator,
            translate_url: lookup("SENTIMENT_TRANSLATE_URL")
                .unwrap_or_else(|| DEFAULT_TRANSLATE_URL.to_string()),
            busy_timeout: Duration::from_millis(busy_timeout_ms),
        })
    }

    /// Check that the model artifact exists.
    /// Call this before building a pipeline that needs the model.
    pub fn require_model(&self) -> Result<()> {
        if !self.model_path.exists() {
            anyhow::bail!(
                "Sentiment model not found at {}\n\
                 Set SENTIMENT_MODEL_PATH to the location of sentiment_model.onnx.",
                self.model_path.display()
            );
        }
        Ok(())
    }
}

/// `<data dir>/sentiment-fusion/models/sentiment_model.onnx`
pub fn default_model_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sentiment-fusion")
        .join("models")
        .join("sentiment_model.onnx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("./sentiment.db"));
        assert_eq!(config.max_length, 256);
        assert_eq!(config.working_language, "en");
        assert_eq!(config.display_language, "id");
        assert_eq!(config.translator, TranslatorBackend::Google);
        assert_eq!(config.busy_timeout, Duration::from_secs(5));
        assert!(config.model_path.ends_with("sentiment_model.onnx"));
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("SENTIMENT_TRANSLATOR", "none"),
            ("SENTIMENT_MAX_LENGTH", "64"),
            ("SENTIMENT_BUSY_TIMEOUT_MS", "250"),
            ("SENTIMENT_WORKING_LANG", "id"),
        ])
        .unwrap();
        assert_eq!(config.translator, TranslatorBackend::None);
        assert_eq!(config.max_length, 64);
        assert_eq!(config.busy_timeout, Duration::from_millis(250));
        assert_eq!(config.working_language, "id");
    }

    #[test]
    fn test_malformed_numbers_are_errors() {
        assert!(config(&[("SENTIMENT_MAX_LENGTH", "lots")]).is_err());
        assert!(config(&[("SENTIMENT_MAX_LENGTH", "0")]).is_err());
        assert!(config(&[("SENTIMENT_BUSY_TIMEOUT_MS", "-1")]).is_err());
    }

    #[test]
    fn test_require_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentiment_model.onnx");
        let mut config = config(&[]).unwrap();
        config.model_path = path.clone();
        assert!(config.require_model().is_err());

        std::fs::write(&path, b"onnx").unwrap();
        assert!(config.require_model().is_ok());
    }
}
