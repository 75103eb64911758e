// Classification pipeline.
//
// classifier: one text end to end (normalize, score, infer, fuse, record).
// fusion: the lexicon/model tie-break policy.
// batch: many texts with bounded concurrency.

pub mod batch;
pub mod classifier;
pub mod fusion;

pub use classifier::{PipelineComponents, SentimentPipeline};
pub use fusion::{fuse, ModelOutcome};
