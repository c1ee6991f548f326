//! @ai:module:intent Report generation for accuracy and load runs
//! @ai:module:layer infrastructure
//! @ai:module:public_api ReportGenerator, JsonReporter, CsvReporter, ChartGenerator, text_report

pub mod charts;
pub mod csv_report;
pub mod json_report;
pub mod text_report;

pub use charts::{ChartGenerator, ChartGeneratorTrait};
pub use csv_report::{CsvReporter, CsvReporterTrait};
pub use json_report::{JsonReporter, JsonReporterTrait};

use crate::evaluator::AccuracyRun;
use crate::metrics::AggregateMetrics;
use crate::runner::LoadTestResult;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// @ai:intent Combined report generator
pub struct ReportGenerator {
    json: JsonReporter,
    csv: CsvReporter,
    charts: Option<ChartGenerator>,
}

impl ReportGenerator {
    /// @ai:intent Create a report generator that also renders charts
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            json: JsonReporter::new(),
            csv: CsvReporter::new(),
            charts: Some(ChartGenerator::new()),
        }
    }

    /// @ai:intent Skip PNG rendering
    /// @ai:effects pure
    pub fn without_charts(mut self) -> Self {
        self.charts = None;
        self
    }

    /// @ai:intent Fresh `<results_dir>/<kind>_<timestamp>` directory
    /// @ai:effects fs:write
    fn run_dir(results_dir: &Path, kind: &str) -> Result<PathBuf> {
        let timestamp = chrono::Utc::now().format("%Y-%m-%d_%H-%M-%S");
        let dir = results_dir.join(format!("{}_{}", kind, timestamp));
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// @ai:intent Write report.txt, results.json, results.csv and charts for an accuracy run
    /// @ai:effects fs:write
    pub fn write_accuracy(
        &self,
        run: &AccuracyRun,
        metrics: &AggregateMetrics,
        results_dir: &Path,
    ) -> Result<PathBuf> {
        let dir = Self::run_dir(results_dir, "accuracy")?;

        std::fs::write(dir.join("report.txt"), text_report::accuracy_report(run, metrics))?;
        self.json.generate_accuracy(run, metrics, &dir.join("results.json"))?;

        let records = run.records();
        self.csv.generate(&records, &dir.join("results.csv"))?;

        if let Some(charts) = &self.charts {
            charts.generate_all(&records, metrics, &dir)?;
        }

        tracing::info!("Accuracy reports generated in {}", dir.display());
        Ok(dir)
    }

    /// @ai:intent Write report.txt, results.json, results.csv and charts for a load test
    /// @ai:effects fs:write
    pub fn write_performance(
        &self,
        result: &LoadTestResult,
        metrics: &AggregateMetrics,
        results_dir: &Path,
    ) -> Result<PathBuf> {
        let dir = Self::run_dir(results_dir, "performance")?;

        std::fs::write(
            dir.join("report.txt"),
            text_report::performance_report(&result.summary, metrics),
        )?;
        self.json.generate_performance(result, metrics, &dir.join("results.json"))?;
        self.csv.generate(&result.results, &dir.join("results.csv"))?;

        if let Some(charts) = &self.charts {
            charts.generate_all(&result.results, metrics, &dir)?;
        }

        tracing::info!("Performance reports generated in {}", dir.display());
        Ok(dir)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricsAggregator, OutcomeRecord};
    use tempfile::TempDir;

    #[test]
    fn test_write_performance_without_charts() {
        let temp = TempDir::new().unwrap();
        let result = LoadTestResult::from_records(
            1,
            200,
            vec![OutcomeRecord::success("0x1", true, 0.9, 200)],
        );
        let metrics = result.aggregate_metrics(&MetricsAggregator::new()).unwrap();

        let dir = ReportGenerator::new()
            .without_charts()
            .write_performance(&result, &metrics, temp.path())
            .unwrap();

        assert!(dir.starts_with(temp.path()));
        assert!(dir
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("performance_"));
        assert!(dir.join("report.txt").exists());
        assert!(dir.join("results.json").exists());
        assert!(dir.join("results.csv").exists());
        assert!(!dir.join("latency.png").exists());
    }
}
