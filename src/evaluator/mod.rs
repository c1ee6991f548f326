//! @ai:module:intent Accuracy evaluation over curated samples
//! @ai:module:layer application
//! @ai:module:public_api AccuracyEvaluator, AccuracyRun, SampleDiagnostic

pub mod accuracy;

pub use accuracy::{AccuracyEvaluator, AccuracyRun, SampleDiagnostic};
