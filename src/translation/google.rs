// Google Translate implementation (public "gtx" web endpoint).
//
// No API key is needed, but the endpoint is unofficial and can throttle or
// change shape without notice, which is why every call is wrapped by the
// gateway's retry policy and every parse failure is a TranslationError.
//
// Response shape (only the fields we read):
//   [ [ [translated, original, ...], ... ],  null,  "<src lang>",  ...,  <confidence at index 6> ]

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::traits::{Detection, Translator};
use crate::error::TranslationError;
use crate::output::truncate_chars;

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com";

/// Per-request timeout. The gateway's retry bound applies on top of this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl GoogleTranslator {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for translation")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// One round trip to the endpoint, returning the parsed JSON body.
    async fn call(&self, text: &str, dest: &str, src: &str) -> Result<Value, TranslationError> {
        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", src),
                ("tl", dest),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslationError::Status {
                status,
                body: truncate_chars(&body, 200),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        dest: &str,
        src: &str,
    ) -> Result<String, TranslationError> {
        let body = self.call(text, dest, src).await?;
        let translated = parse_translation(&body)?;

        debug!(
            src,
            dest,
            text_preview = %truncate_chars(text, 50),
            translated_preview = %truncate_chars(&translated, 50),
            "Translated text"
        );

        Ok(translated)
    }

    async fn detect(&self, text: &str) -> Result<Detection, TranslationError> {
        // Detection piggybacks on a translation request; "en" is arbitrary.
        let body = self.call(text, "en", "auto").await?;
        parse_detection(&body)
    }
}

/// Concatenate the translated segments of a response.
fn parse_translation(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Malformed("missing segment list".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::Malformed(
            "no translated segments".to_string(),
        ));
    }
    Ok(translated)
}

/// Read the detected source language and its confidence.
fn parse_detection(body: &Value) -> Result<Detection, TranslationError> {
    let language = body
        .get(2)
        .and_then(Value::as_str)
        .filter(|lang| !lang.is_empty())
        .ok_or_else(|| TranslationError::Malformed("missing source language".to_string()))?;

    let confidence = body
        .get(6)
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
        .clamp(0.0, 1.0);

    Ok(Detection {
        language: language.to_string(),
        confidence,
    })
}
