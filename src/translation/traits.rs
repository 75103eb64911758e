// Translator trait: the swap-ready abstraction.
//
// Implementations may fail on any call; callers go through
// TranslationGateway, which owns the retry and fallback policy.

use async_trait::async_trait;

use crate::error::TranslationError;

/// Source language as reported by the translation service.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// ISO 639-1 style code, e.g. "en", "id"
    pub language: String,
    /// Service-reported confidence, 0.0 to 1.0 (0.0 if not reported)
    pub confidence: f64,
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `dest`. `src` is a language code or "auto".
    async fn translate(&self, text: &str, dest: &str, src: &str)
        -> Result<String, TranslationError>;

    /// Detect the language of `text`.
    async fn detect(&self, text: &str) -> Result<Detection, TranslationError>;
}

/// Offline translator: every text is already in the working language.
pub struct IdentityTranslator {
    language: String,
}

impl IdentityTranslator {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

#[async_trait]
impl Translator for IdentityTranslator {
    async fn translate(
        &self,
        text: &str,
        _dest: &str,
        _src: &str,
    ) -> Result<String, TranslationError> {
        Ok(text.to_string())
    }

    async fn detect(&self, _text: &str) -> Result<Detection, TranslationError> {
        Ok(Detection {
            language: self.language.clone(),
            confidence: 1.0,
        })
    }
}
