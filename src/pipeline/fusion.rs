// FusionResolver: combine the lexicon and model verdicts.
//
// Rules, first match wins:
//   1. model unavailable (failed, or an unmapped class) -> lexicon verbatim
//   2. labels agree -> that label, max of the two confidences
//   3. labels disagree -> higher confidence wins, ties go to the model
//
// Blank input and profanity are decided before fusion ever runs; see
// `profanity_override` and `ClassificationResult::blank`. The evidence
// words always come from the lexicon.

use tracing::debug;

use crate::db::models::{ClassificationResult, Sentiment};
use crate::lexicon::LexiconVerdict;
use crate::model::ModelVerdict;

/// Confidence reported when profanity short-circuits the pipeline.
pub const PROFANITY_CONFIDENCE: f64 = 0.92;

/// The model's contribution to one classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModelOutcome {
    Verdict(ModelVerdict),
    /// No model, inference failed, or the verdict can't be used.
    Unavailable,
}

impl From<Option<ModelVerdict>> for ModelOutcome {
    fn from(verdict: Option<ModelVerdict>) -> Self {
        verdict.map_or(ModelOutcome::Unavailable, ModelOutcome::Verdict)
    }
}

/// Negative at 0.92 with no evidence.
pub fn profanity_override() -> ClassificationResult {
    ClassificationResult::new(Sentiment::Negative, PROFANITY_CONFIDENCE, Vec::new(), Vec::new())
}

pub fn fuse(lexicon: LexiconVerdict, model: ModelOutcome) -> ClassificationResult {
    let (label, confidence) = resolve(&lexicon, model);
    ClassificationResult::new(label, confidence, lexicon.positive_words, lexicon.translations)
}

fn resolve(lexicon: &LexiconVerdict, model: ModelOutcome) -> (Sentiment, f64) {
    let verdict = match model {
        ModelOutcome::Verdict(v) => v,
        ModelOutcome::Unavailable => {
            debug!(label = %lexicon.label, "Model unavailable, using lexicon verdict");
            return (lexicon.label, lexicon.confidence);
        }
    };

    let Some(model_label) = verdict.sentiment() else {
        debug!(
            model_label = %verdict.label,
            "Model returned an unmapped class, using lexicon verdict"
        );
        return (lexicon.label, lexicon.confidence);
    };

    if model_label == lexicon.label {
        return (model_label, verdict.confidence.max(lexicon.confidence));
    }

    debug!(
        lexicon = %lexicon.label,
        lexicon_confidence = lexicon.confidence,
        model = %model_label,
        model_confidence = verdict.confidence,
        "Lexicon and model disagree"
    );
    if verdict.confidence >= lexicon.confidence {
        (model_label, verdict.confidence)
    } else {
        (lexicon.label, lexicon.confidence)
    }
}
