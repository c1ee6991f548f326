//! @ai:module:intent JSON report generation
//! @ai:module:layer infrastructure
//! @ai:module:public_api JsonReporter, JsonReporterTrait
//! @ai:module:stateless true

use crate::evaluator::AccuracyRun;
use crate::metrics::{AggregateMetrics, OutcomeRecord};
use crate::oracle::TokenAnalysis;
use crate::runner::{LoadSummary, LoadTestResult};
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

/// @ai:intent Trait for JSON report generation
pub trait JsonReporterTrait: Send + Sync {
    /// @ai:intent Write `{metrics, results}` for an accuracy run
    fn generate_accuracy(&self, run: &AccuracyRun, metrics: &AggregateMetrics, output_path: &Path) -> Result<()>;

    /// @ai:intent Write `{performance, metrics, results}` for a load test
    fn generate_performance(
        &self,
        result: &LoadTestResult,
        metrics: &AggregateMetrics,
        output_path: &Path,
    ) -> Result<()>;
}

#[derive(Serialize)]
struct AccuracyEntry<'a> {
    symbol: &'a str,
    name: &'a str,
    #[serde(flatten)]
    record: &'a OutcomeRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<&'a TokenAnalysis>,
}

#[derive(Serialize)]
struct AccuracyDocument<'a> {
    metrics: &'a AggregateMetrics,
    results: Vec<AccuracyEntry<'a>>,
}

#[derive(Serialize)]
struct PerformanceDocument<'a> {
    performance: &'a LoadSummary,
    metrics: &'a AggregateMetrics,
    results: &'a [OutcomeRecord],
}

/// @ai:intent Generates JSON reports from evaluation runs
pub struct JsonReporter;

impl JsonReporter {
    /// @ai:intent Create a new JSON reporter
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    fn write<T: Serialize>(document: &T, output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(document)?;
        std::fs::write(output_path, json)?;
        Ok(())
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporterTrait for JsonReporter {
    /// @ai:effects fs:write
    fn generate_accuracy(&self, run: &AccuracyRun, metrics: &AggregateMetrics, output_path: &Path) -> Result<()> {
        let results = run
            .diagnostics
            .iter()
            .map(|d| AccuracyEntry {
                symbol: &d.sample.symbol,
                name: &d.sample.name,
                record: &d.record,
                analysis: d.analysis.as_ref(),
            })
            .collect();

        Self::write(&AccuracyDocument { metrics, results }, output_path)
    }

    /// @ai:effects fs:write
    fn generate_performance(
        &self,
        result: &LoadTestResult,
        metrics: &AggregateMetrics,
        output_path: &Path,
    ) -> Result<()> {
        let document = PerformanceDocument {
            performance: &result.summary,
            metrics,
            results: &result.results,
        };

        Self::write(&document, output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricsAggregator, MetricsAggregatorTrait};
    use tempfile::TempDir;

    #[test]
    fn test_generate_performance_json() {
        let reporter = JsonReporter::new();
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("performance.json");

        let result = LoadTestResult::from_records(
            2,
            1000,
            vec![
                OutcomeRecord::success("0xaaa", true, 0.8, 150),
                OutcomeRecord::failure("0xbbb", false, 40, "network error: reset"),
            ],
        );
        let metrics = MetricsAggregator::new().aggregate(&result.results, 1000).unwrap();

        reporter.generate_performance(&result, &metrics, &output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["performance"]["concurrency_level"], 2);
        assert_eq!(value["performance"]["failed_requests"], 1);
        assert_eq!(value["metrics"]["success_rate"], 0.5);
        assert_eq!(value["results"].as_array().unwrap().len(), 2);
        assert_eq!(value["results"][1]["outcome"]["status"], "failure");
    }

    #[test]
    fn test_generate_accuracy_json_omits_missing_analysis() {
        use crate::corpus::builtin_corpus;
        use crate::evaluator::SampleDiagnostic;

        let sample = builtin_corpus().remove(0);
        let run = AccuracyRun {
            diagnostics: vec![SampleDiagnostic {
                record: OutcomeRecord::failure(&sample.token_address, sample.actual_label(), 5, "boom"),
                analysis: None,
                sample,
            }],
            elapsed_ms: 5,
        };
        let metrics = run.metrics(&MetricsAggregator::new()).unwrap();

        let temp = TempDir::new().unwrap();
        let output = temp.path().join("accuracy.json");
        JsonReporter::new().generate_accuracy(&run, &metrics, &output).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let entry = &value["results"][0];
        assert_eq!(entry["symbol"], "PEPE");
        assert_eq!(entry["actual_label"], true);
        assert!(entry.get("analysis").is_none());
        assert_eq!(value["metrics"]["successful_requests"], 0);
    }
}
