//! @ai:module:intent Meme token reliability evaluation library
//! @ai:module:layer application
//! @ai:module:public_api config, corpus, error, evaluator, metrics, oracle, report, runner

pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluator;
pub mod metrics;
pub mod oracle;
pub mod report;
pub mod runner;

pub use config::EvalConfig;
pub use corpus::{ClassificationRequest, CorpusLoader, TokenSample};
pub use error::{EvalError, OracleError, Result};
pub use evaluator::{AccuracyEvaluator, AccuracyRun};
pub use metrics::{AggregateMetrics, FailurePolicy, MetricsAggregator, MetricsAggregatorTrait, OutcomeRecord};
pub use oracle::{ClassificationOracle, MockOracle, OpenAiOracle, TokenAnalysis};
pub use report::ReportGenerator;
pub use runner::{LoadDriver, LoadTestResult};
