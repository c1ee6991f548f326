//! End-to-end runs against the heuristic oracle

use meme_eval::corpus::{builtin_corpus, curated_sample};
use meme_eval::evaluator::AccuracyEvaluator;
use meme_eval::metrics::{FailurePolicy, MetricsAggregator};
use meme_eval::oracle::MockOracle;
use meme_eval::report::ReportGenerator;
use meme_eval::runner::LoadDriver;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

#[tokio::test(start_paused = true)]
async fn test_load_test_over_builtin_corpus() {
    let corpus = builtin_corpus();
    let oracle = Arc::new(MockOracle::with_latency(Duration::from_millis(50)));

    let result = LoadDriver::new(oracle)
        .run_load_test(&corpus, 5, 2)
        .await
        .expect("load test should run");

    assert_eq!(result.summary.total_requests, 20);
    assert_eq!(result.summary.successful_requests, 20);
    assert_eq!(result.summary.total_duration_ms, 200);
    assert_eq!(result.summary.min_response_time, 50);
    assert_eq!(result.summary.max_response_time, 50);

    let metrics = result
        .aggregate_metrics(&MetricsAggregator::new())
        .expect("records are non-empty");

    assert_eq!(metrics.total_requests, 20);
    assert_eq!(metrics.confusion.total(), 20);
    assert_eq!(metrics.success_rate, 1.0);
    assert!((metrics.throughput - 100.0).abs() < 1e-9);
    assert!((0.0..=1.0).contains(&metrics.accuracy));
}

#[tokio::test]
async fn test_accuracy_run_writes_reports() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let corpus = builtin_corpus();
    let samples = curated_sample(&corpus, 3, 2);

    let run = AccuracyEvaluator::new(Arc::new(MockOracle::new()))
        .evaluate(&samples)
        .await
        .expect("evaluation should run");
    let metrics = run
        .metrics(&MetricsAggregator::with_policy(FailurePolicy::CountAsNegative))
        .expect("records are non-empty");

    let dir = ReportGenerator::new()
        .without_charts()
        .write_accuracy(&run, &metrics, temp.path())
        .expect("reports should be written");

    let report = std::fs::read_to_string(dir.join("report.txt")).expect("report.txt exists");
    assert!(report.contains("Samples evaluated: 5"));
    assert!(report.contains("Shiba Inu (SHIB)"));

    let csv = std::fs::read_to_string(dir.join("results.csv")).expect("results.csv exists");
    assert_eq!(csv.lines().count(), 6);

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.join("results.json")).expect("results.json exists"))
            .expect("valid JSON");
    assert_eq!(json["metrics"]["failure_policy"], "count_as_negative");
    assert_eq!(json["results"].as_array().map(Vec::len), Some(5));
}
