// ModelInferenceAdapter: text in, sentiment verdict out.
//
// Encoding: lower-cased whitespace tokens, truncated to `max_length`, each
// mapped to fnv1a_64(token) % 10000 / 10000; unused positions are zero.
// The hash is fixed (not the std hasher) so features are identical across
// runs, builds and platforms.
//
// Interpretation depends on the output width: a multi-class head is
// argmax'ed through INDEX_LABELS, a single scalar is read as a binary
// sigmoid with a neutral band in the middle.

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::traits::{InferenceEngine, ModelOutput};
use crate::db::models::Sentiment;
use crate::error::InferenceError;

/// Default encoded sequence length.
pub const DEFAULT_MAX_LENGTH: usize = 256;

/// Hash buckets per token feature.
pub const FEATURE_BUCKETS: u64 = 10_000;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Class index → label for multi-class heads.
const INDEX_LABELS: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

/// Scalar heads: below this is negative.
const SCALAR_NEGATIVE_BELOW: f64 = 0.4;
/// Scalar heads: above this is positive.
const SCALAR_POSITIVE_ABOVE: f64 = 0.6;

/// 64-bit FNV-1a over raw bytes.
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Feature value for one token, in [0, 1).
pub fn token_feature(token: &str) -> f32 {
    (fnv1a_64(token.as_bytes()) % FEATURE_BUCKETS) as f32 / FEATURE_BUCKETS as f32
}

/// What the model said. Indices outside the class table are kept as-is
/// instead of being coerced into one of the three sentiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelLabel {
    Sentiment(Sentiment),
    UnknownClass(usize),
}

impl fmt::Display for ModelLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelLabel::Sentiment(s) => write!(f, "{s}"),
            ModelLabel::UnknownClass(n) => write!(f, "class_{n}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelVerdict {
    pub label: ModelLabel,
    /// 0.0 to 1.0
    pub confidence: f64,
}

impl ModelVerdict {
    pub fn new(label: Sentiment, confidence: f64) -> Self {
        Self {
            label: ModelLabel::Sentiment(label),
            confidence,
        }
    }

    /// The sentiment, if the class index was one we know.
    pub fn sentiment(&self) -> Option<Sentiment> {
        match self.label {
            ModelLabel::Sentiment(s) => Some(s),
            ModelLabel::UnknownClass(_) => None,
        }
    }
}

pub struct ModelInferenceAdapter {
    engine: Arc<dyn InferenceEngine>,
    max_length: usize,
}

impl ModelInferenceAdapter {
    pub fn new(engine: Arc<dyn InferenceEngine>, max_length: usize) -> Self {
        Self {
            engine,
            max_length: max_length.max(1),
        }
    }

    /// Encode `text` into exactly `max_length` features.
    pub fn encode(&self, text: &str) -> Vec<f32> {
        let mut features: Vec<f32> = text
            .to_lowercase()
            .split_whitespace()
            .take(self.max_length)
            .map(token_feature)
            .collect();
        features.resize(self.max_length, 0.0);
        features
    }

    /// Run the model on already-normalized text.
    pub async fn predict(&self, text: &str) -> Result<ModelVerdict, InferenceError> {
        let input = self.encode(text);
        let output = self.engine.infer(input, [1, self.max_length]).await?;
        let verdict = interpret(&output)?;

        debug!(
            label = %verdict.label,
            confidence = verdict.confidence,
            shape = ?output.shape,
            "Model verdict"
        );
        Ok(verdict)
    }
}

/// Turn a raw output tensor into a verdict.
pub fn interpret(output: &ModelOutput) -> Result<ModelVerdict, InferenceError> {
    if output.values.is_empty() {
        return Err(InferenceError::EmptyOutput);
    }

    let classes = output.class_dim();
    if classes > 1 {
        let row = output
            .values
            .get(..classes)
            .ok_or_else(|| InferenceError::ShapeMismatch {
                shape: output.shape.clone(),
                len: output.values.len(),
            })?;

        let (index, &probability) = row
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .ok_or(InferenceError::EmptyOutput)?;

        let label = match INDEX_LABELS.get(index) {
            Some(&s) => ModelLabel::Sentiment(s),
            None => ModelLabel::UnknownClass(index),
        };
        return Ok(ModelVerdict {
            label,
            confidence: unit(f64::from(probability)),
        });
    }

    let score = unit(f64::from(output.values[0]));
    let verdict = if score < SCALAR_NEGATIVE_BELOW {
        ModelVerdict::new(Sentiment::Negative, 1.0 - score)
    } else if score > SCALAR_POSITIVE_ABOVE {
        ModelVerdict::new(Sentiment::Positive, score)
    } else {
        ModelVerdict::new(Sentiment::Neutral, 0.5 + (score - 0.5).abs())
    };
    Ok(verdict)
}

fn unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the input it was given and returns a canned output.
    struct CannedEngine {
        output: ModelOutput,
        seen: Mutex<Option<(Vec<f32>, [usize; 2])>>,
    }

    impl CannedEngine {
        fn new(shape: Vec<usize>, values: Vec<f32>) -> Self {
            Self {
                output: ModelOutput::new(shape, values),
                seen: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl InferenceEngine for CannedEngine {
        async fn infer(
            &self,
            input: Vec<f32>,
            shape: [usize; 2],
        ) -> Result<ModelOutput, InferenceError> {
            *self.seen.lock().unwrap() = Some((input, shape));
            Ok(self.output.clone())
        }
    }

    fn output(shape: &[usize], values: &[f32]) -> ModelOutput {
        ModelOutput::new(shape.to_vec(), values.to_vec())
    }

    #[test]
    fn test_fnv1a_reference_values() {
        assert_eq!(fnv1a_64(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a_64(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv1a_64(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_encode_pads_truncates_and_lowercases() {
        let engine = Arc::new(CannedEngine::new(vec![1, 1], vec![0.5]));
        let adapter = ModelInferenceAdapter::new(engine, 4);

        let short = adapter.encode("Great  product");
        assert_eq!(short.len(), 4);
        assert_eq!(short[0], token_feature("great"));
        assert_eq!(short[1], token_feature("product"));
        assert_eq!(&short[2..], &[0.0, 0.0]);

        let long = adapter.encode("a b c d e f");
        assert_eq!(long.len(), 4);
        assert_eq!(long[3], token_feature("d"));

        assert!(short.iter().all(|f| (0.0..1.0).contains(f)));
    }

    #[test]
    fn test_multiclass_argmax() {
        let verdict = interpret(&output(&[1, 3], &[0.1, 0.2, 0.7])).unwrap();
        assert_eq!(verdict.label, ModelLabel::Sentiment(Sentiment::Positive));
        assert!((verdict.confidence - 0.7).abs() < 1e-6);

        let verdict = interpret(&output(&[1, 3], &[0.8, 0.15, 0.05])).unwrap();
        assert_eq!(verdict.sentiment(), Some(Sentiment::Negative));
    }

    #[test]
    fn test_unmapped_class_is_surfaced() {
        let verdict = interpret(&output(&[1, 5], &[0.1, 0.1, 0.1, 0.1, 0.6])).unwrap();
        assert_eq!(verdict.label, ModelLabel::UnknownClass(4));
        assert_eq!(verdict.label.to_string(), "class_4");
        assert_eq!(verdict.sentiment(), None);
    }

    #[test]
    fn test_scalar_bands() {
        let negative = interpret(&output(&[1, 1], &[0.1])).unwrap();
        assert_eq!(negative.sentiment(), Some(Sentiment::Negative));
        assert!((negative.confidence - 0.9).abs() < 1e-6);

        let positive = interpret(&output(&[1, 1], &[0.85])).unwrap();
        assert_eq!(positive.sentiment(), Some(Sentiment::Positive));
        assert!((positive.confidence - 0.85).abs() < 1e-6);

        let neutral = interpret(&output(&[1, 1], &[0.45])).unwrap();
        assert_eq!(neutral.sentiment(), Some(Sentiment::Neutral));
        assert!((neutral.confidence - 0.55).abs() < 1e-6);

        // Boundaries are neutral
        let edge = interpret(&output(&[1], &[0.4])).unwrap();
        assert_eq!(edge.sentiment(), Some(Sentiment::Neutral));
    }

    #[test]
    fn test_malformed_outputs_are_errors() {
        assert!(matches!(
            interpret(&output(&[1, 3], &[])),
            Err(InferenceError::EmptyOutput)
        ));
        assert!(matches!(
            interpret(&output(&[1, 3], &[0.2, 0.8])),
            Err(InferenceError::ShapeMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_predict_passes_fixed_shape() {
        let engine = Arc::new(CannedEngine::new(vec![1, 3], vec![0.2, 0.6, 0.2]));
        let adapter = ModelInferenceAdapter::new(engine.clone(), 8);

        let verdict = adapter.predict("the parcel arrived").await.unwrap();
        assert_eq!(verdict.sentiment(), Some(Sentiment::Neutral));

        let (input, shape) = engine.seen.lock().unwrap().clone().unwrap();
        assert_eq!(shape, [1, 8]);
        assert_eq!(input.len(), 8);
    }
}
