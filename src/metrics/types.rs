//! @ai:module:intent Outcome records and derived classification metrics
//! @ai:module:layer domain
//! @ai:module:public_api Outcome, OutcomeRecord, ConfusionCounts, AggregateMetrics, FailurePolicy
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// Scores strictly above this are "predicted reliable".
pub const DECISION_THRESHOLD: f64 = 0.5;

/// @ai:intent Result of one oracle call, produced exactly once per dispatched request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Success { predicted_score: f64, latency_ms: u64 },
    Failure { latency_ms: u64, error: String },
}

impl Outcome {
    /// @ai:effects pure
    pub fn latency_ms(&self) -> u64 {
        match self {
            Outcome::Success { latency_ms, .. } | Outcome::Failure { latency_ms, .. } => *latency_ms,
        }
    }

    /// @ai:effects pure
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// @ai:effects pure
    pub fn predicted_score(&self) -> Option<f64> {
        match self {
            Outcome::Success { predicted_score, .. } => Some(*predicted_score),
            Outcome::Failure { .. } => None,
        }
    }

    /// @ai:effects pure
    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure { error, .. } => Some(error),
        }
    }
}

/// @ai:intent One settled request: ground truth plus what the oracle said
///            Immutable once created; drivers only ever append these
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub sample_id: String,
    /// True when the token is actually reliable
    pub actual_label: bool,
    pub outcome: Outcome,
}

impl OutcomeRecord {
    /// @ai:effects pure
    pub fn success(sample_id: impl Into<String>, actual_label: bool, predicted_score: f64, latency_ms: u64) -> Self {
        Self {
            sample_id: sample_id.into(),
            actual_label,
            outcome: Outcome::Success {
                predicted_score,
                latency_ms,
            },
        }
    }

    /// @ai:effects pure
    pub fn failure(
        sample_id: impl Into<String>,
        actual_label: bool,
        latency_ms: u64,
        error: impl Into<String>,
    ) -> Self {
        Self {
            sample_id: sample_id.into(),
            actual_label,
            outcome: Outcome::Failure {
                latency_ms,
                error: error.into(),
            },
        }
    }

    /// @ai:intent Decision for a successful record, None for failures
    /// @ai:effects pure
    pub fn predicted_reliable(&self) -> Option<bool> {
        self.outcome
            .predicted_score()
            .map(|score| score > DECISION_THRESHOLD)
    }

    /// @ai:intent Whether the prediction matches ground truth (None for failures)
    /// @ai:effects pure
    pub fn is_correct(&self) -> Option<bool> {
        self.predicted_reliable()
            .map(|predicted| predicted == self.actual_label)
    }
}

/// @ai:intent How failed requests enter the confusion matrix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Failures count only toward the success-rate denominator
    #[default]
    Exclude,
    /// Failures are scored as "predicted not reliable"
    #[value(name = "negative")]
    CountAsNegative,
}

impl FailurePolicy {
    /// @ai:effects pure
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Exclude => "exclude",
            FailurePolicy::CountAsNegative => "count_as_negative",
        }
    }
}

impl std::fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// @ai:intent Confusion matrix, "positive" meaning reliable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionCounts {
    pub true_positive: u32,
    pub false_positive: u32,
    pub true_negative: u32,
    pub false_negative: u32,
}

impl ConfusionCounts {
    /// @ai:intent Place one classified record in exactly one bucket
    /// @ai:effects pure
    pub fn record(&mut self, predicted_reliable: bool, actually_reliable: bool) {
        match (predicted_reliable, actually_reliable) {
            (true, true) => self.true_positive += 1,
            (true, false) => self.false_positive += 1,
            (false, false) => self.true_negative += 1,
            (false, true) => self.false_negative += 1,
        }
    }

    /// @ai:effects pure
    pub fn total(&self) -> u32 {
        self.true_positive + self.false_positive + self.true_negative + self.false_negative
    }

    /// @ai:effects pure
    pub fn accuracy(&self) -> f64 {
        ratio(self.true_positive + self.true_negative, self.total())
    }

    /// @ai:effects pure
    pub fn precision(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_positive)
    }

    /// @ai:effects pure
    pub fn recall(&self) -> f64 {
        ratio(self.true_positive, self.true_positive + self.false_negative)
    }

    /// @ai:intent Harmonic mean of precision and recall, 0 when both are 0
    /// @ai:effects pure
    pub fn f1_score(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        let denominator = precision + recall;

        if denominator == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / denominator
        }
    }
}

fn ratio(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// @ai:intent Classification quality plus latency/throughput statistics for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    /// Mean latency of successful requests (ms)
    pub average_response_time: f64,
    /// Successful requests per wall-clock second
    pub throughput: f64,
    pub success_rate: f64,
    pub confusion: ConfusionCounts,
    pub total_requests: u32,
    pub successful_requests: u32,
    pub failure_policy: FailurePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert_eq!(OutcomeRecord::success("a", true, 0.5, 10).predicted_reliable(), Some(false));
        assert_eq!(OutcomeRecord::success("a", true, 0.51, 10).predicted_reliable(), Some(true));
        assert_eq!(OutcomeRecord::failure("a", true, 10, "boom").predicted_reliable(), None);
    }

    #[test]
    fn test_is_correct() {
        assert_eq!(OutcomeRecord::success("a", false, 0.2, 1).is_correct(), Some(true));
        assert_eq!(OutcomeRecord::success("a", false, 0.9, 1).is_correct(), Some(false));
        assert_eq!(OutcomeRecord::failure("a", false, 1, "x").is_correct(), None);
    }

    #[test]
    fn test_confusion_buckets() {
        let mut counts = ConfusionCounts::default();
        counts.record(true, true);
        counts.record(true, false);
        counts.record(false, false);
        counts.record(false, true);
        counts.record(true, true);

        assert_eq!(counts.true_positive, 2);
        assert_eq!(counts.total(), 5);
        assert!((counts.accuracy() - 0.6).abs() < 1e-9);
        assert!((counts.precision() - 2.0 / 3.0).abs() < 1e-9);
        assert!((counts.recall() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_counts_are_zero() {
        let counts = ConfusionCounts::default();
        assert_eq!(counts.accuracy(), 0.0);
        assert_eq!(counts.precision(), 0.0);
        assert_eq!(counts.recall(), 0.0);
        assert_eq!(counts.f1_score(), 0.0);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let record = OutcomeRecord::failure("0x1", true, 42, "timeout");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["outcome"]["status"], "failure");
        assert_eq!(json["outcome"]["latency_ms"], 42);
        assert_eq!(json["outcome"]["error"], "timeout");
    }
}
