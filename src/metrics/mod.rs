//! @ai:module:intent Outcome records and metric aggregation
//! @ai:module:layer application
//! @ai:module:public_api Outcome, OutcomeRecord, ConfusionCounts, AggregateMetrics, MetricsAggregator

pub mod aggregator;
pub mod types;

pub use aggregator::{requests_per_second, MetricsAggregator, MetricsAggregatorTrait};
pub use types::{
    AggregateMetrics, ConfusionCounts, FailurePolicy, Outcome, OutcomeRecord, DECISION_THRESHOLD,
};
