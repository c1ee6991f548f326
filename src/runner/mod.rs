//! @ai:module:intent Concurrent load testing against the classification oracle
//! @ai:module:layer application
//! @ai:module:public_api LoadDriver, LoadTestResult, LoadSummary

pub mod load_driver;

pub use load_driver::{LoadDriver, LoadSummary, LoadTestResult};
