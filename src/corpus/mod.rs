//! @ai:module:intent Labeled token corpus: records, built-in data, and loading
//! @ai:module:layer domain
//! @ai:module:public_api TokenSample, ClassificationRequest, CorpusLoader, builtin_corpus

pub mod dataset;
pub mod loader;
pub mod token;

pub use dataset::{builtin_corpus, curated_sample, random_sample, reliable, scams};
pub use loader::{CorpusLoader, CorpusLoaderTrait};
pub use token::{ClassificationRequest, TokenSample};
