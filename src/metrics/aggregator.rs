//! @ai:module:intent Pure aggregation of outcome records into classification metrics
//! @ai:module:layer application
//! @ai:module:public_api MetricsAggregator, MetricsAggregatorTrait
//! @ai:module:stateless true

use crate::error::{EvalError, Result};
use crate::metrics::types::{AggregateMetrics, ConfusionCounts, FailurePolicy, OutcomeRecord};

/// @ai:intent Trait for metrics aggregation
pub trait MetricsAggregatorTrait: Send + Sync {
    /// @ai:intent Aggregate a record sequence observed over `elapsed_ms` of wall-clock time
    /// @ai:pre records is non-empty
    fn aggregate(&self, records: &[OutcomeRecord], elapsed_ms: u64) -> Result<AggregateMetrics>;
}

/// @ai:intent Computes confusion-matrix metrics and latency statistics
///            Holds only the failure policy, so repeated calls are idempotent
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsAggregator {
    failure_policy: FailurePolicy,
}

impl MetricsAggregator {
    /// @ai:intent Create an aggregator that excludes failures from the confusion matrix
    /// @ai:effects pure
    pub fn new() -> Self {
        Self::default()
    }

    /// @ai:effects pure
    pub fn with_policy(failure_policy: FailurePolicy) -> Self {
        Self { failure_policy }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// @ai:intent Bucket every classified record
    ///            Under Exclude, failures are skipped; under CountAsNegative they are predicted-negative
    /// @ai:effects pure
    pub fn confusion_counts(&self, records: &[OutcomeRecord]) -> ConfusionCounts {
        let mut counts = ConfusionCounts::default();

        for record in records {
            let predicted = match (record.predicted_reliable(), self.failure_policy) {
                (Some(predicted), _) => predicted,
                (None, FailurePolicy::CountAsNegative) => false,
                (None, FailurePolicy::Exclude) => continue,
            };
            counts.record(predicted, record.actual_label);
        }

        counts
    }
}

/// @ai:intent Calculate average of an iterator of f64
/// @ai:effects pure
fn average<I: Iterator<Item = f64>>(iter: I) -> f64 {
    let (sum, count) = iter.fold((0.0, 0u32), |(s, c), v| (s + v, c + 1));

    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// @ai:intent Successful requests per second of wall-clock time
/// @ai:effects pure
pub fn requests_per_second(successful: u32, elapsed_ms: u64) -> f64 {
    if elapsed_ms == 0 {
        0.0
    } else {
        successful as f64 / elapsed_ms as f64 * 1000.0
    }
}

impl MetricsAggregatorTrait for MetricsAggregator {
    /// @ai:intent Aggregate records into metrics
    /// @ai:effects pure
    fn aggregate(&self, records: &[OutcomeRecord], elapsed_ms: u64) -> Result<AggregateMetrics> {
        if records.is_empty() {
            return Err(EvalError::EmptyResultSet);
        }

        let confusion = self.confusion_counts(records);

        let total_requests = records.len() as u32;
        let successful_requests = records.iter().filter(|r| r.outcome.is_success()).count() as u32;

        let average_response_time = average(
            records
                .iter()
                .filter(|r| r.outcome.is_success())
                .map(|r| r.outcome.latency_ms() as f64),
        );

        Ok(AggregateMetrics {
            accuracy: confusion.accuracy(),
            precision: confusion.precision(),
            recall: confusion.recall(),
            f1_score: confusion.f1_score(),
            average_response_time,
            throughput: requests_per_second(successful_requests, elapsed_ms),
            success_rate: successful_requests as f64 / total_requests as f64,
            confusion,
            total_requests,
            successful_requests,
            failure_policy: self.failure_policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_average() {
        let values = vec![10.0, 20.0, 30.0];
        assert!((average(values.into_iter()) - 20.0).abs() < 0.01);
    }

    #[test]
    fn test_average_empty() {
        let values: Vec<f64> = vec![];
        assert!((average(values.into_iter()) - 0.0).abs() < 0.01);
    }

    #[test]
    fn test_all_reliable_predicted_reliable() {
        let records: Vec<_> = (0..5)
            .map(|i| OutcomeRecord::success(format!("r{i}"), true, 0.9, 100))
            .collect();

        let metrics = MetricsAggregator::new().aggregate(&records, 500).unwrap();

        assert!(approx(metrics.accuracy, 1.0));
        assert!(approx(metrics.precision, 1.0));
        assert!(approx(metrics.recall, 1.0));
        assert!(approx(metrics.f1_score, 1.0));
        assert!(approx(metrics.throughput, 10.0));
    }

    #[test]
    fn test_every_token_predicted_reliable() {
        let mut records: Vec<_> = (0..3)
            .map(|i| OutcomeRecord::success(format!("r{i}"), true, 0.8, 100))
            .collect();
        records.extend((0..2).map(|i| OutcomeRecord::success(format!("s{i}"), false, 0.8, 100)));

        let aggregator = MetricsAggregator::new();
        let metrics = aggregator.aggregate(&records, 500).unwrap();

        assert_eq!(
            metrics.confusion,
            ConfusionCounts {
                true_positive: 3,
                false_positive: 2,
                true_negative: 0,
                false_negative: 0,
            }
        );
        assert!(approx(metrics.accuracy, 0.6));
        assert!(approx(metrics.precision, 0.6));
        assert!(approx(metrics.recall, 1.0));
        assert!(approx(metrics.f1_score, 0.75));
    }

    #[test]
    fn test_failure_excluded_from_confusion_matrix() {
        let records = vec![
            OutcomeRecord::success("a", true, 0.9, 100),
            OutcomeRecord::success("b", true, 0.9, 200),
            OutcomeRecord::success("c", false, 0.1, 300),
            OutcomeRecord::failure("d", true, 50, "network error"),
        ];

        let metrics = MetricsAggregator::new().aggregate(&records, 1000).unwrap();

        assert_eq!(metrics.total_requests, 4);
        assert_eq!(metrics.successful_requests, 3);
        assert!(approx(metrics.success_rate, 0.75));
        assert_eq!(metrics.confusion.total(), 3);
        assert!(approx(metrics.accuracy, 1.0));
        assert!(approx(metrics.average_response_time, 200.0));
        assert!(approx(metrics.throughput, 3.0));
    }

    #[test]
    fn test_failure_counted_as_negative() {
        let records = vec![
            OutcomeRecord::success("a", true, 0.9, 100),
            OutcomeRecord::failure("b", true, 50, "timeout"),
            OutcomeRecord::failure("c", false, 50, "timeout"),
        ];

        let aggregator = MetricsAggregator::with_policy(FailurePolicy::CountAsNegative);
        let metrics = aggregator.aggregate(&records, 1000).unwrap();

        assert_eq!(metrics.confusion.total(), 3);
        assert_eq!(metrics.confusion.false_negative, 1);
        assert_eq!(metrics.confusion.true_negative, 1);
        assert!(approx(metrics.recall, 0.5));
        assert!(approx(metrics.accuracy, 2.0 / 3.0));
        assert_eq!(metrics.failure_policy, FailurePolicy::CountAsNegative);
    }

    #[test]
    fn test_all_failures_do_not_divide_by_zero() {
        let records = vec![
            OutcomeRecord::failure("a", true, 10, "x"),
            OutcomeRecord::failure("b", false, 10, "y"),
        ];

        let metrics = MetricsAggregator::new().aggregate(&records, 0).unwrap();

        assert_eq!(metrics.accuracy, 0.0);
        assert_eq!(metrics.precision, 0.0);
        assert_eq!(metrics.recall, 0.0);
        assert_eq!(metrics.f1_score, 0.0);
        assert_eq!(metrics.average_response_time, 0.0);
        assert_eq!(metrics.throughput, 0.0);
        assert_eq!(metrics.success_rate, 0.0);
    }

    #[test]
    fn test_empty_records_rejected() {
        let result = MetricsAggregator::new().aggregate(&[], 100);
        assert!(matches!(result, Err(EvalError::EmptyResultSet)));
    }

    #[test]
    fn test_metrics_bounded_and_idempotent_over_random_inputs() {
        let mut rng = StdRng::seed_from_u64(7);

        for round in 0..200 {
            let len = rng.gen_range(1..40);
            let records: Vec<_> = (0..len)
                .map(|i| {
                    let actual = rng.gen_bool(0.5);
                    if rng.gen_bool(0.2) {
                        OutcomeRecord::failure(format!("{round}-{i}"), actual, rng.gen_range(0..500), "err")
                    } else {
                        OutcomeRecord::success(
                            format!("{round}-{i}"),
                            actual,
                            rng.gen_range(0.0..=1.0),
                            rng.gen_range(0..500),
                        )
                    }
                })
                .collect();

            let failures = records.iter().filter(|r| !r.outcome.is_success()).count() as u32;

            for policy in [FailurePolicy::Exclude, FailurePolicy::CountAsNegative] {
                let aggregator = MetricsAggregator::with_policy(policy);
                let first = aggregator.aggregate(&records, 1000).unwrap();
                let second = aggregator.aggregate(&records, 1000).unwrap();
                assert_eq!(first, second);

                let classified = match policy {
                    FailurePolicy::Exclude => len as u32 - failures,
                    FailurePolicy::CountAsNegative => len as u32,
                };
                assert_eq!(first.confusion.total(), classified);

                for value in [first.accuracy, first.precision, first.recall, first.f1_score, first.success_rate] {
                    assert!((0.0..=1.0).contains(&value), "metric out of range: {value}");
                }
            }
        }
    }
}
