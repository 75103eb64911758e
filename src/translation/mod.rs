// Translation: trait-based abstraction over the translation service.
//
// The Translator trait defines the interface. GoogleTranslator talks to the
// public translate endpoint; IdentityTranslator is the offline stand-in.
// TranslationGateway wraps either one with the bounded retry policy and
// never lets a failure reach the pipeline.

pub mod gateway;
pub mod google;
pub mod traits;

pub use gateway::{RetryPolicy, Translation, TranslationGateway};
pub use traits::{Detection, IdentityTranslator, Translator};
