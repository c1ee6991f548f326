//! @ai:module:intent Bounded-concurrency load driver for the classification oracle
//! @ai:module:layer application
//! @ai:module:public_api LoadDriver, LoadTestResult, LoadSummary
//! @ai:module:stateless false

use crate::corpus::TokenSample;
use crate::error::{EvalError, Result};
use crate::metrics::{requests_per_second, AggregateMetrics, MetricsAggregator, MetricsAggregatorTrait, OutcomeRecord};
use crate::oracle::ClassificationOracle;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// @ai:intent Throughput and latency figures of one load test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub concurrency_level: usize,
    pub total_requests: usize,
    pub successful_requests: usize,
    pub failed_requests: usize,
    /// First admission to last settlement
    pub total_duration_ms: u64,
    /// Over successful requests only; 0 when none succeeded
    pub average_response_time: f64,
    pub min_response_time: u64,
    pub max_response_time: u64,
    pub requests_per_second: f64,
}

/// @ai:intent Full outcome of a load test: summary plus one record per dispatched request
///            `results` is in completion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadTestResult {
    #[serde(flatten)]
    pub summary: LoadSummary,
    pub results: Vec<OutcomeRecord>,
}

impl LoadTestResult {
    /// @ai:intent Build the summary from settled records and the measured wall-clock span
    /// @ai:effects pure
    pub fn from_records(concurrency_level: usize, total_duration_ms: u64, results: Vec<OutcomeRecord>) -> Self {
        let latencies: Vec<u64> = results
            .iter()
            .filter(|r| r.outcome.is_success())
            .map(|r| r.outcome.latency_ms())
            .collect();

        let successful_requests = latencies.len();
        let total_requests = results.len();

        let average_response_time = if latencies.is_empty() {
            0.0
        } else {
            latencies.iter().sum::<u64>() as f64 / latencies.len() as f64
        };

        Self {
            summary: LoadSummary {
                concurrency_level,
                total_requests,
                successful_requests,
                failed_requests: total_requests - successful_requests,
                total_duration_ms,
                average_response_time,
                min_response_time: latencies.iter().copied().min().unwrap_or(0),
                max_response_time: latencies.iter().copied().max().unwrap_or(0),
                requests_per_second: requests_per_second(successful_requests as u32, total_duration_ms),
            },
            results,
        }
    }

    /// @ai:intent Classification metrics for this run, throughput over its wall-clock span
    /// @ai:effects pure
    pub fn aggregate_metrics(&self, aggregator: &MetricsAggregator) -> Result<AggregateMetrics> {
        aggregator.aggregate(&self.results, self.summary.total_duration_ms)
    }
}

/// @ai:intent Repeat the sample set `repeat_count` times, round by round
/// @ai:effects pure
fn expand_dispatch_order(samples: &[TokenSample], repeat_count: usize) -> VecDeque<&TokenSample> {
    (0..repeat_count).flat_map(|_| samples.iter()).collect()
}

/// @ai:intent Drives many independent oracle calls with at most N in flight
pub struct LoadDriver<O: ClassificationOracle> {
    oracle: Arc<O>,
}

impl<O: ClassificationOracle> LoadDriver<O> {
    /// @ai:effects pure
    pub fn new(oracle: Arc<O>) -> Self {
        Self { oracle }
    }

    /// @ai:intent Run every sample `repeat_count` times with a sliding window of `concurrency_level`
    ///            Individual oracle failures are recorded, never returned
    /// @ai:pre samples non-empty, concurrency_level >= 1, repeat_count >= 1
    /// @ai:post results.len() == samples.len() * repeat_count
    /// @ai:effects network
    pub async fn run_load_test(
        &self,
        samples: &[TokenSample],
        concurrency_level: usize,
        repeat_count: usize,
    ) -> Result<LoadTestResult> {
        if samples.is_empty() {
            return Err(EvalError::invalid_config("sample set must not be empty"));
        }
        if concurrency_level == 0 {
            return Err(EvalError::invalid_config("concurrency level must be at least 1"));
        }
        if repeat_count == 0 {
            return Err(EvalError::invalid_config("repeat count must be at least 1"));
        }

        let queue = expand_dispatch_order(samples, repeat_count);
        let total_requests = queue.len();

        tracing::info!(
            "Starting load test: {} requests, concurrency {}",
            total_requests,
            concurrency_level
        );

        let queue = Mutex::new(queue);
        let results = Mutex::new(Vec::with_capacity(total_requests));

        // Each worker holds one slot; a slot frees as soon as its request settles.
        let worker_count = concurrency_level.min(total_requests);
        let started = Instant::now();
        join_all((0..worker_count).map(|worker_id| self.worker(worker_id, &queue, &results))).await;
        let total_duration_ms = started.elapsed().as_millis() as u64;

        let results = results.into_inner();
        let result = LoadTestResult::from_records(concurrency_level, total_duration_ms, results);

        tracing::info!(
            "Load test finished in {}ms: {} succeeded, {} failed",
            result.summary.total_duration_ms,
            result.summary.successful_requests,
            result.summary.failed_requests
        );

        Ok(result)
    }

    /// @ai:intent Pull requests off the shared queue until it drains
    /// @ai:effects network, state:write
    async fn worker(
        &self,
        worker_id: usize,
        queue: &Mutex<VecDeque<&TokenSample>>,
        results: &Mutex<Vec<OutcomeRecord>>,
    ) {
        loop {
            let next = queue.lock().await.pop_front();
            let Some(sample) = next else {
                break;
            };

            let record = self.dispatch(sample).await;
            tracing::debug!(
                "worker {} settled {} in {}ms",
                worker_id,
                record.sample_id,
                record.outcome.latency_ms()
            );
            results.lock().await.push(record);
        }
    }

    /// @ai:intent Classify one sample, timing from admission to settlement
    /// @ai:effects network
    async fn dispatch(&self, sample: &TokenSample) -> OutcomeRecord {
        let request = sample.to_request();
        let admitted = Instant::now();

        match self.oracle.classify(&request).await {
            Ok(analysis) => OutcomeRecord::success(
                sample.token_address.clone(),
                sample.actual_label(),
                analysis.reliability_score,
                admitted.elapsed().as_millis() as u64,
            ),
            Err(e) => {
                tracing::warn!("Classification failed for {}: {}", sample.display_name(), e);
                OutcomeRecord::failure(
                    sample.token_address.clone(),
                    sample.actual_label(),
                    admitted.elapsed().as_millis() as u64,
                    e.to_string(),
                )
            }
        }
    }
}
