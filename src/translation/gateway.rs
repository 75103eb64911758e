// Translation gateway: bounded retry around a Translator.
//
// Every call makes at most `attempts` requests, sleeping a fixed backoff
// between failed attempts (not after the last one). When all attempts fail
// the input comes back unchanged, tagged as such, so callers can tell
// "translated" from "gave up" without an error path.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::traits::{Detection, Translator};
use crate::output::truncate_chars;

/// Attempts per translation call.
pub const MAX_ATTEMPTS: u32 = 3;

/// Wait between failed attempts.
pub const RETRY_BACKOFF: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: MAX_ATTEMPTS,
            backoff: RETRY_BACKOFF,
        }
    }
}

/// Outcome of a translation call.
#[derive(Debug, Clone, PartialEq)]
pub enum Translation {
    Translated(String),
    /// The original text, returned because translation was skipped or failed.
    Unchanged(String),
}

impl Translation {
    pub fn text(&self) -> &str {
        match self {
            Translation::Translated(t) | Translation::Unchanged(t) => t,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Translation::Translated(t) | Translation::Unchanged(t) => t,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, Translation::Translated(_))
    }
}

/// Text normalized into the working language.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub text: Translation,
    /// Detected source language, None if detection failed.
    pub source_language: Option<String>,
}

pub struct TranslationGateway {
    translator: Arc<dyn Translator>,
    policy: RetryPolicy,
}

impl TranslationGateway {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self::with_policy(translator, RetryPolicy::default())
    }

    pub fn with_policy(translator: Arc<dyn Translator>, policy: RetryPolicy) -> Self {
        Self { translator, policy }
    }

    /// Best-effort language detection. Failures are logged and read as
    /// "unknown".
    pub async fn detect_language(&self, text: &str) -> Option<Detection> {
        match self.translator.detect(text).await {
            Ok(detection) => {
                info!(
                    language = %detection.language,
                    confidence = detection.confidence,
                    "Detected language"
                );
                Some(detection)
            }
            Err(e) => {
                warn!(error = %e, "Language detection failed, continuing with original text");
                None
            }
        }
    }

    /// Translate `text` into `dest`. `src` of None means "auto".
    ///
    /// Never fails: after the last failed attempt the input is returned as
    /// `Translation::Unchanged`.
    pub async fn translate(&self, text: &str, dest: &str, src: Option<&str>) -> Translation {
        if text.trim().is_empty() || src == Some(dest) {
            return Translation::Unchanged(text.to_string());
        }
        let src = src.unwrap_or("auto");
        let attempts = self.policy.attempts.max(1);

        for attempt in 1..=attempts {
            match self.translator.translate(text, dest, src).await {
                Ok(translated) => return Translation::Translated(translated),
                Err(e) => {
                    warn!(
                        attempt,
                        max_attempts = attempts,
                        error = %e,
                        "Translation failed"
                    );
                    if attempt < attempts {
                        tokio::time::sleep(self.policy.backoff).await;
                    }
                }
            }
        }

        warn!(
            text_preview = %truncate_chars(text, 30),
            "Translation attempts exhausted, keeping original text"
        );
        Translation::Unchanged(text.to_string())
    }

    /// Translate a single word for display. Single-character tokens are
    /// returned as-is without a request.
    pub async fn translate_word(&self, word: &str, dest: &str, src: Option<&str>) -> String {
        if word.chars().count() <= 1 {
            return word.to_string();
        }
        self.translate(word, dest, src).await.into_text()
    }

    /// Translate each word independently, preserving order.
    pub async fn translate_words(
        &self,
        words: &[String],
        dest: &str,
        src: Option<&str>,
    ) -> Vec<String> {
        join_all(
            words
                .iter()
                .map(|word| self.translate_word(word, dest, src)),
        )
        .await
    }

    /// Bring `text` into `working_language`.
    ///
    /// Translation is skipped when the text is already detected as the
    /// working language; an unknown language is translated from "auto".
    pub async fn normalize(&self, text: &str, working_language: &str) -> Normalized {
        let source_language = self.detect_language(text).await.map(|d| d.language);

        let text = if source_language.as_deref() == Some(working_language) {
            Translation::Unchanged(text.to_string())
        } else {
            let translated = self.translate(text, working_language, None).await;
            if translated.is_translated() {
                debug!(
                    translated_preview = %truncate_chars(translated.text(), 50),
                    "Text normalized"
                );
            }
            translated
        };

        Normalized {
            text,
            source_language,
        }
    }
}
