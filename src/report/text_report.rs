//! @ai:module:intent Human-readable text reports for accuracy and load runs
//! @ai:module:layer presentation
//! @ai:module:public_api accuracy_report, performance_report, format_metrics
//! @ai:module:stateless true

use crate::evaluator::{AccuracyRun, SampleDiagnostic};
use crate::metrics::AggregateMetrics;
use crate::runner::LoadSummary;
use std::fmt;

fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// @ai:intent Classification and performance block shared by both reports
struct MetricsBlock<'a>(&'a AggregateMetrics);

impl fmt::Display for MetricsBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;

        writeln!(f, "Classification metrics:")?;
        writeln!(f, "- Accuracy: {}", percent(m.accuracy))?;
        writeln!(f, "- Precision: {}", percent(m.precision))?;
        writeln!(f, "- Recall: {}", percent(m.recall))?;
        writeln!(f, "- F1 score: {}", percent(m.f1_score))?;
        writeln!(
            f,
            "- Confusion: TP={} FP={} TN={} FN={} (failures: {})",
            m.confusion.true_positive,
            m.confusion.false_positive,
            m.confusion.true_negative,
            m.confusion.false_negative,
            m.failure_policy
        )?;
        writeln!(f)?;
        writeln!(f, "Performance metrics:")?;
        writeln!(f, "- Average response time: {:.2}ms", m.average_response_time)?;
        writeln!(f, "- Throughput: {:.2} requests/s", m.throughput)?;
        writeln!(f, "- Success rate: {}", percent(m.success_rate))
    }
}

struct SampleLine<'a>(&'a SampleDiagnostic);

impl fmt::Display for SampleLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let diagnostic = self.0;
        let actual = if diagnostic.sample.is_scam {
            "not reliable"
        } else {
            "reliable"
        };

        writeln!(f, "* {}", diagnostic.sample.display_name())?;
        writeln!(f, "   - Actual: {}", actual)?;

        match (&diagnostic.analysis, diagnostic.record.outcome.error()) {
            (Some(analysis), _) => {
                writeln!(f, "   - Score: {:.2}", analysis.reliability_score)?;
                writeln!(f, "   - Recommendation: {}", analysis.recommendation)?;
            }
            (None, error) => {
                writeln!(f, "   - Analysis failed: {}", error.unwrap_or("unknown error"))?;
            }
        }

        let verdict = match diagnostic.verdict() {
            Some(true) => "✓ correct",
            Some(false) => "✗ wrong",
            None => "not scored",
        };
        writeln!(f, "   - Verdict: {}", verdict)
    }
}

/// @ai:intent Render the metrics block alone
/// @ai:effects pure
pub fn format_metrics(metrics: &AggregateMetrics) -> String {
    MetricsBlock(metrics).to_string()
}

/// @ai:intent Render the accuracy report with per-sample diagnostics
/// @ai:effects pure
pub fn accuracy_report(run: &AccuracyRun, metrics: &AggregateMetrics) -> String {
    let mut output = String::new();

    output.push_str("====== Meme Token Accuracy Report ======\n\n");
    output.push_str(&format!("Samples evaluated: {}\n\n", run.diagnostics.len()));
    output.push_str(&format_metrics(metrics));
    output.push_str("\nPer-sample results:\n");

    for diagnostic in &run.diagnostics {
        output.push_str(&SampleLine(diagnostic).to_string());
    }

    output
}

/// @ai:intent Render the load test report
/// @ai:effects pure
pub fn performance_report(summary: &LoadSummary, metrics: &AggregateMetrics) -> String {
    let mut output = String::new();

    output.push_str("====== Load Test Report ======\n\n");
    output.push_str(&format!("Concurrency level: {}\n", summary.concurrency_level));
    output.push_str(&format!("Total requests: {}\n", summary.total_requests));
    output.push_str(&format!("Successful requests: {}\n", summary.successful_requests));
    output.push_str(&format!("Failed requests: {}\n", summary.failed_requests));
    output.push_str(&format!(
        "Total duration: {}ms ({:.2}s)\n\n",
        summary.total_duration_ms,
        summary.total_duration_ms as f64 / 1000.0
    ));

    output.push_str("Response time:\n");
    output.push_str(&format!("- Average: {:.2}ms\n", summary.average_response_time));
    output.push_str(&format!("- Min: {}ms\n", summary.min_response_time));
    output.push_str(&format!("- Max: {}ms\n\n", summary.max_response_time));
    output.push_str(&format!("Requests per second: {:.2}\n\n", summary.requests_per_second));

    output.push_str(&format_metrics(metrics));
    output
}
