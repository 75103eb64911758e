// The classification pipeline.
//
//   raw text -> blank check -> profanity check -> normalize
//            -> profanity check on the normalized text
//            -> lexicon scoring || model inference
//            -> fusion -> (optionally) statistics store
//
// Every collaborator is handed in at construction. Nothing in here returns
// an error: each failure has already been degraded by the component that
// saw it (original text, lexicon-only verdict, neutral 0.5, `false`).

use std::sync::Arc;

use tracing::{info, warn};

use super::fusion::{fuse, profanity_override, ModelOutcome};
use crate::db::models::{ClassificationResult, DailyStatistic};
use crate::db::StatisticsStore;
use crate::lexicon::{BackTranslation, LexiconScorer};
use crate::model::ModelInferenceAdapter;
use crate::output::truncate_chars;
use crate::profanity::ProfanityDetector;
use crate::translation::TranslationGateway;

/// Everything the pipeline needs, gathered by the caller.
pub struct PipelineComponents {
    pub profanity: Arc<ProfanityDetector>,
    pub gateway: Arc<TranslationGateway>,
    pub lexicon: LexiconScorer,
    /// None runs lexicon-only.
    pub model: Option<ModelInferenceAdapter>,
    pub store: Arc<dyn StatisticsStore>,
    /// Language the lexicon and model work in.
    pub working_language: String,
    /// Back-translation target when the source language is unknown.
    pub display_language: String,
}

pub struct SentimentPipeline {
    profanity: Arc<ProfanityDetector>,
    gateway: Arc<TranslationGateway>,
    lexicon: LexiconScorer,
    model: Option<ModelInferenceAdapter>,
    store: Arc<dyn StatisticsStore>,
    working_language: String,
    display_language: String,
}

impl SentimentPipeline {
    pub fn new(components: PipelineComponents) -> Self {
        let PipelineComponents {
            profanity,
            gateway,
            lexicon,
            model,
            store,
            working_language,
            display_language,
        } = components;

        Self {
            profanity,
            gateway,
            lexicon,
            model,
            store,
            working_language,
            display_language,
        }
    }

    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Classify one text. Always returns a well-formed result.
    pub async fn classify(&self, text: &str) -> ClassificationResult {
        if text.trim().is_empty() {
            return ClassificationResult::blank();
        }

        if self.profanity.contains_profanity(text) {
            info!(text_preview = %truncate_chars(text, 30), "Profanity in input");
            return profanity_override();
        }

        let normalized = self.gateway.normalize(text, &self.working_language).await;
        let working_text = normalized.text.text();

        if self.profanity.contains_profanity(working_text) {
            info!(
                text_preview = %truncate_chars(working_text, 30),
                "Profanity in normalized text"
            );
            return profanity_override();
        }

        // Evidence goes back to the language the user wrote in
        let back = BackTranslation {
            dest: normalized
                .source_language
                .as_deref()
                .unwrap_or(&self.display_language),
            src: &self.working_language,
        };

        let (lexicon, model) = tokio::join!(
            self.lexicon.score(working_text, &self.gateway, back),
            self.predict(working_text),
        );

        fuse(lexicon, model)
    }

    /// Persist a result. False if the store rejected it.
    pub async fn record(&self, text: &str, result: &ClassificationResult) -> bool {
        self.store.append(text, result).await
    }

    /// Classify, then record. A failed write is logged and doesn't affect
    /// the returned result.
    pub async fn record_and_classify(&self, text: &str) -> ClassificationResult {
        let result = self.classify(text).await;
        if !self.record(text, &result).await {
            warn!(label = %result.label(), "Classification not recorded");
        }
        result
    }

    /// The most recent `limit` days, newest first. Empty on failure.
    pub async fn recent_statistics(&self, limit: u32) -> Vec<DailyStatistic> {
        self.store.recent(limit).await
    }

    async fn predict(&self, text: &str) -> ModelOutcome {
        let Some(model) = &self.model else {
            return ModelOutcome::Unavailable;
        };

        match model.predict(text).await {
            Ok(verdict) => ModelOutcome::Verdict(verdict),
            Err(e) => {
                warn!(error = %e, "Model inference failed, falling back to lexicon");
                ModelOutcome::Unavailable
            }
        }
    }
}
