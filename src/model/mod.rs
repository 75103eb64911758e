// Neural sentiment model: trait-based abstraction over the inference runtime.
//
// InferenceEngine is the swap point (OnnxEngine in production, stubs in
// tests). ModelInferenceAdapter owns everything sentiment-specific: feature
// encoding and reading the output tensor back as a verdict.

pub mod adapter;
pub mod onnx;
pub mod traits;

pub use adapter::{ModelInferenceAdapter, ModelLabel, ModelVerdict};
pub use onnx::OnnxEngine;
pub use traits::{InferenceEngine, ModelOutput};
