//! @ai:module:intent Sequential accuracy evaluation with per-sample diagnostics
//! @ai:module:layer application
//! @ai:module:public_api AccuracyEvaluator, AccuracyRun, SampleDiagnostic
//! @ai:module:stateless false

use crate::corpus::TokenSample;
use crate::error::{EvalError, Result};
use crate::metrics::{AggregateMetrics, MetricsAggregator, MetricsAggregatorTrait, OutcomeRecord};
use crate::oracle::{ClassificationOracle, TokenAnalysis};
use crate::report::text_report;
use std::sync::Arc;
use tokio::time::Instant;

/// @ai:intent One evaluated sample: the token, what the oracle said, and the settled record
#[derive(Debug, Clone)]
pub struct SampleDiagnostic {
    pub sample: TokenSample,
    /// None when the call failed
    pub analysis: Option<TokenAnalysis>,
    pub record: OutcomeRecord,
}

impl SampleDiagnostic {
    /// @ai:intent predicted-reliable == actual-reliable, None for failed calls
    /// @ai:effects pure
    pub fn verdict(&self) -> Option<bool> {
        self.record.is_correct()
    }
}

/// @ai:intent Records of one sequential run, in sample order
#[derive(Debug, Clone)]
pub struct AccuracyRun {
    pub diagnostics: Vec<SampleDiagnostic>,
    /// Wall-clock span of the whole run
    pub elapsed_ms: u64,
}

impl AccuracyRun {
    /// @ai:intent The raw record sequence handed to the aggregator
    /// @ai:effects pure
    pub fn records(&self) -> Vec<OutcomeRecord> {
        self.diagnostics.iter().map(|d| d.record.clone()).collect()
    }

    /// @ai:effects pure
    pub fn metrics(&self, aggregator: &MetricsAggregator) -> Result<AggregateMetrics> {
        aggregator.aggregate(&self.records(), self.elapsed_ms)
    }

    /// @ai:intent Human-readable report: metrics followed by per-sample verdicts
    /// @ai:effects pure
    pub fn report(&self, aggregator: &MetricsAggregator) -> Result<String> {
        let metrics = self.metrics(aggregator)?;
        Ok(text_report::accuracy_report(self, &metrics))
    }
}

/// @ai:intent Drives the oracle one sample at a time for reproducible diagnostics
pub struct AccuracyEvaluator<O: ClassificationOracle> {
    oracle: Arc<O>,
}

impl<O: ClassificationOracle> AccuracyEvaluator<O> {
    /// @ai:effects pure
    pub fn new(oracle: Arc<O>) -> Self {
        Self { oracle }
    }

    /// @ai:intent Classify each sample in order, recording failures instead of aborting
    /// @ai:pre samples is non-empty
    /// @ai:effects network
    pub async fn evaluate(&self, samples: &[TokenSample]) -> Result<AccuracyRun> {
        if samples.is_empty() {
            return Err(EvalError::invalid_config("accuracy sample must not be empty"));
        }

        let total = samples.len();
        let mut diagnostics = Vec::with_capacity(total);
        let started = Instant::now();

        for (index, sample) in samples.iter().enumerate() {
            tracing::info!("[{}/{}] Analyzing {}", index + 1, total, sample.display_name());

            let request_start = Instant::now();
            let result = self.oracle.classify(&sample.to_request()).await;
            let latency_ms = request_start.elapsed().as_millis() as u64;

            let diagnostic = match result {
                Ok(analysis) => SampleDiagnostic {
                    record: OutcomeRecord::success(
                        sample.token_address.clone(),
                        sample.actual_label(),
                        analysis.reliability_score,
                        latency_ms,
                    ),
                    analysis: Some(analysis),
                    sample: sample.clone(),
                },
                Err(e) => {
                    tracing::warn!("Analysis failed for {}: {}", sample.display_name(), e);
                    SampleDiagnostic {
                        record: OutcomeRecord::failure(
                            sample.token_address.clone(),
                            sample.actual_label(),
                            latency_ms,
                            e.to_string(),
                        ),
                        analysis: None,
                        sample: sample.clone(),
                    }
                }
            };

            diagnostics.push(diagnostic);
        }

        Ok(AccuracyRun {
            diagnostics,
            elapsed_ms: started.elapsed().as_millis() as u64,
        })
    }
}
