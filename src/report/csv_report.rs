//! @ai:module:intent CSV export of raw outcome records
//! @ai:module:layer infrastructure
//! @ai:module:public_api CsvReporter, CsvReporterTrait, to_csv
//! @ai:module:stateless true

use crate::metrics::OutcomeRecord;
use anyhow::Result;
use std::path::Path;

const HEADERS: [&str; 6] = ["sampleId", "actualLabel", "predictedScore", "responseTime", "success", "error"];

/// @ai:intent Trait for CSV export
pub trait CsvReporterTrait: Send + Sync {
    /// @ai:intent Write one row per record
    fn generate(&self, records: &[OutcomeRecord], output_path: &Path) -> Result<()>;
}

/// @ai:intent Quote a cell when it contains a comma, a quote or a newline
/// @ai:effects pure
fn escape(cell: &str) -> String {
    if cell.contains([',', '"', '\n']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// @ai:intent Render records as CSV text, header first, no trailing newline
/// @ai:effects pure
pub fn to_csv(records: &[OutcomeRecord]) -> String {
    let mut rows = vec![HEADERS.join(",")];

    for record in records {
        let cells = [
            record.sample_id.clone(),
            record.actual_label.to_string(),
            record
                .outcome
                .predicted_score()
                .map(|s| s.to_string())
                .unwrap_or_default(),
            record.outcome.latency_ms().to_string(),
            record.outcome.is_success().to_string(),
            record.outcome.error().unwrap_or_default().to_string(),
        ];

        rows.push(cells.iter().map(|c| escape(c)).collect::<Vec<_>>().join(","));
    }

    rows.join("\n")
}

/// @ai:intent Writes outcome records as CSV files
pub struct CsvReporter;

impl CsvReporter {
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvReporterTrait for CsvReporter {
    /// @ai:effects fs:write
    fn generate(&self, records: &[OutcomeRecord], output_path: &Path) -> Result<()> {
        std::fs::write(output_path, to_csv(records))?;
        Ok(())
    }
}
