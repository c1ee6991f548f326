//! @ai:module:intent Chart generation for evaluation runs
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartGenerator, ChartGeneratorTrait
//! @ai:module:stateless true

use crate::metrics::{AggregateMetrics, OutcomeRecord};
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

const HISTOGRAM_BUCKETS: usize = 10;

/// @ai:intent Trait for chart generation
pub trait ChartGeneratorTrait: Send + Sync {
    /// @ai:intent Generate all charts for one run, returning the file names written
    fn generate_all(
        &self,
        records: &[OutcomeRecord],
        metrics: &AggregateMetrics,
        output_dir: &Path,
    ) -> Result<Vec<String>>;
}

/// @ai:intent Split successful latencies into equal-width buckets
/// @ai:effects pure
fn latency_buckets(records: &[OutcomeRecord]) -> (u64, u64, Vec<u32>) {
    let latencies: Vec<u64> = records
        .iter()
        .filter(|r| r.outcome.is_success())
        .map(|r| r.outcome.latency_ms())
        .collect();

    let min = latencies.iter().copied().min().unwrap_or(0);
    let max = latencies.iter().copied().max().unwrap_or(0);
    let width = ((max - min) / HISTOGRAM_BUCKETS as u64).max(1);

    let mut buckets = vec![0u32; HISTOGRAM_BUCKETS];
    for latency in latencies {
        let index = (((latency - min) / width) as usize).min(HISTOGRAM_BUCKETS - 1);
        buckets[index] += 1;
    }

    (min, width, buckets)
}

/// @ai:intent Generates charts from evaluation records and metrics
pub struct ChartGenerator;

impl ChartGenerator {
    /// @ai:intent Create a new chart generator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }

    /// @ai:intent Bar chart of the classification rates
    /// @ai:effects fs:write
    fn generate_metrics_chart(&self, metrics: &AggregateMetrics, output_path: &Path) -> Result<()> {
        let root = BitMapBackend::new(output_path, (800, 600)).into_drawing_area();
        root.fill(&WHITE)?;

        let bars = [
            ("Accuracy", metrics.accuracy),
            ("Precision", metrics.precision),
            ("Recall", metrics.recall),
            ("F1", metrics.f1_score),
            ("Success", metrics.success_rate),
        ];

        let mut chart = ChartBuilder::on(&root)
            .caption("Classification Metrics", ("sans-serif", 30))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..bars.len() as i32, 0f64..100f64)?;

        chart
            .configure_mesh()
            .x_labels(bars.len())
            .y_desc("Rate (%)")
            .x_label_formatter(&|x| {
                bars.get(*x as usize)
                    .map(|(name, _)| name.to_string())
                    .unwrap_or_default()
            })
            .draw()?;

        chart.draw_series(bars.iter().enumerate().map(|(i, (_, value))| {
            Rectangle::new(
                [(i as i32, 0.0), (i as i32 + 1, value * 100.0)],
                BLUE.mix(0.7).filled(),
            )
        }))?;

        root.present()?;
        Ok(())
    }

    /// @ai:intent Histogram of successful response times
    /// @ai:effects fs:write
    fn generate_latency_chart(&self, records: &[OutcomeRecord], output_path: &Path) -> Result<()> {
        let root = BitMapBackend::new(output_path, (800, 500)).into_drawing_area();
        root.fill(&WHITE)?;

        let (min, width, buckets) = latency_buckets(records);
        let peak = buckets.iter().copied().max().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption("Response Time Distribution", ("sans-serif", 25))
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(0..HISTOGRAM_BUCKETS as i32, 0u32..peak + 1)?;

        chart
            .configure_mesh()
            .y_desc("Requests")
            .x_desc("Latency (ms)")
            .x_label_formatter(&|x| format!("{}", min + *x as u64 * width))
            .draw()?;

        chart.draw_series(buckets.iter().enumerate().map(|(i, count)| {
            Rectangle::new([(i as i32, 0), (i as i32 + 1, *count)], GREEN.mix(0.7).filled())
        }))?;

        root.present()?;
        Ok(())
    }
}

impl Default for ChartGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartGeneratorTrait for ChartGenerator {
    /// @ai:intent Generate all charts
    /// @ai:effects fs:write
    fn generate_all(
        &self,
        records: &[OutcomeRecord],
        metrics: &AggregateMetrics,
        output_dir: &Path,
    ) -> Result<Vec<String>> {
        std::fs::create_dir_all(output_dir)?;

        let mut generated = Vec::new();

        self.generate_metrics_chart(metrics, &output_dir.join("metrics.png"))?;
        generated.push("metrics.png".to_string());

        self.generate_latency_chart(records, &output_dir.join("latency.png"))?;
        generated.push("latency.png".to_string());

        Ok(generated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricsAggregator, MetricsAggregatorTrait};
    use tempfile::TempDir;

    #[test]
    fn test_latency_buckets() {
        let records: Vec<_> = (0..=10)
            .map(|i| OutcomeRecord::success(format!("s{}", i), true, 0.9, 100 + i * 10))
            .chain(std::iter::once(OutcomeRecord::failure("f", true, 5, "x")))
            .collect();

        let (min, width, buckets) = latency_buckets(&records);

        assert_eq!(min, 100);
        assert_eq!(width, 10);
        assert_eq!(buckets.iter().sum::<u32>(), 11);
        assert_eq!(buckets[HISTOGRAM_BUCKETS - 1], 2);
    }

    #[test]
    fn test_latency_buckets_empty() {
        let (_, width, buckets) = latency_buckets(&[]);
        assert_eq!(width, 1);
        assert!(buckets.iter().all(|b| *b == 0));
    }

    #[test]
    fn test_generate_all_charts() {
        let generator = ChartGenerator::new();
        let temp = TempDir::new().unwrap();
        let records = vec![
            OutcomeRecord::success("a", true, 0.9, 120),
            OutcomeRecord::success("b", false, 0.2, 340),
            OutcomeRecord::success("c", false, 0.7, 210),
        ];
        let metrics = MetricsAggregator::new().aggregate(&records, 700).unwrap();

        let files = generator.generate_all(&records, &metrics, temp.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(temp.path().join("metrics.png").exists());
        assert!(temp.path().join("latency.png").exists());
    }
}
