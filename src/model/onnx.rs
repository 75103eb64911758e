// Local ONNX sentiment model.
//
// The artifact is a small quantized classifier taking one f32 tensor of
// shape [1, max_length] (hashed token features) and producing either class
// probabilities [1, n] or a single sigmoid score [1, 1]. Loading happens
// once at startup and a bad artifact is fatal; individual runs can still
// fail and are reported as InferenceError.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tracing::{debug, info};

use super::traits::{InferenceEngine, ModelOutput};
use crate::error::{InferenceError, ModelLoadError};

pub struct OnnxEngine {
    // ort::Session::run takes &mut self, and spawn_blocking needs 'static,
    // so the session is shared as Arc<Mutex<_>>. Runs are serialized.
    session: Arc<Mutex<Session>>,
}

impl OnnxEngine {
    /// Load the model artifact at `model_path`.
    pub fn load(model_path: &Path) -> Result<Self, ModelLoadError> {
        if !model_path.exists() {
            return Err(ModelLoadError::NotFound(model_path.to_path_buf()));
        }

        let invalid = |reason: String| ModelLoadError::Invalid {
            path: model_path.to_path_buf(),
            reason,
        };

        let session = Session::builder()
            .map_err(|e| invalid(e.to_string()))?
            .commit_from_file(model_path)
            .map_err(|e| invalid(e.to_string()))?;

        info!(model = %model_path.display(), "Loaded ONNX sentiment model");

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
        })
    }
}

#[async_trait]
impl InferenceEngine for OnnxEngine {
    async fn infer(&self, input: Vec<f32>, shape: [usize; 2]) -> Result<ModelOutput, InferenceError> {
        if input.len() != shape[0] * shape[1] {
            return Err(InferenceError::ShapeMismatch {
                shape: shape.to_vec(),
                len: input.len(),
            });
        }

        let session = Arc::clone(&self.session);

        // Inference is CPU-bound; keep it off the async runtime.
        tokio::task::spawn_blocking(move || {
            let dims = [shape[0] as i64, shape[1] as i64];
            let tensor = Tensor::from_array((dims, input))
                .map_err(|e| InferenceError::Runtime(e.to_string()))?;

            let mut session = session
                .lock()
                .map_err(|e| InferenceError::Runtime(format!("Session lock poisoned: {e}")))?;

            let outputs = session
                .run(ort::inputs![tensor])
                .map_err(|e| InferenceError::Runtime(e.to_string()))?;

            let (out_shape, data) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| InferenceError::Runtime(e.to_string()))?;
            let out_shape: Vec<usize> = out_shape.iter().map(|&d| d.max(0) as usize).collect();

            debug!(shape = ?out_shape, "ONNX inference complete");

            Ok(ModelOutput::new(out_shape, data.to_vec()))
        })
        .await
        .map_err(|e| InferenceError::Task(e.to_string()))?
    }
}
