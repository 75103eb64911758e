// Inference engine trait: the seam between the adapter and the runtime.
//
// The engine knows nothing about sentiment: it takes a flat f32 buffer with
// a shape and returns the first output tensor. Encoding the text and
// interpreting the output belong to ModelInferenceAdapter.

use async_trait::async_trait;

use crate::error::InferenceError;

/// A dense output tensor: row-major values plus dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelOutput {
    pub shape: Vec<usize>,
    pub values: Vec<f32>,
}

impl ModelOutput {
    pub fn new(shape: Vec<usize>, values: Vec<f32>) -> Self {
        Self { shape, values }
    }

    /// Size of the last dimension (the class axis); the value count when the
    /// shape is empty.
    pub fn class_dim(&self) -> usize {
        self.shape.last().copied().unwrap_or(self.values.len())
    }
}

#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Run one forward pass over `input` laid out as `shape`.
    async fn infer(&self, input: Vec<f32>, shape: [usize; 2]) -> Result<ModelOutput, InferenceError>;
}
