//! Output formatting and persistence for pipeline results.
//!
//! Supports pretty-printing, JSON serialization, and CSV append.

use anyhow::Result;
use tracing::{debug, info};

use crate::pipeline::types::{DailyResult, SummaryReport};
use crate::records::rows_from_results;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs daily results using Rust's debug pretty-print format.
pub fn print_pretty(results: &[DailyResult]) {
    debug!("{:#?}", results);
}

/// Logs a summary report as pretty-printed JSON.
pub fn print_summary_json(report: &SummaryReport) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Writes a summary report to a file as pretty-printed JSON.
pub fn write_summary(path: &str, report: &SummaryReport) -> Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(report)?)?;
    info!(path, months = report.months.len(), "Summary written");
    Ok(())
}

/// Appends daily results as rows to a CSV file, one row per observation.
///
/// Creates the file with headers if it does not already exist.
pub fn append_daily_results(path: &str, results: &[DailyResult]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV records");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    for row in rows_from_results(results) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::Domain;
    use crate::pipeline::risk::RiskTier;
    use crate::pipeline::types::Observation;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_results() -> Vec<DailyResult> {
        vec![DailyResult {
            day: 1,
            entity: "Truck".to_string(),
            observations: vec![Observation {
                kind: "CO2 (kg)".to_string(),
                value: 450.0,
                tier: RiskTier::Low,
            }],
        }]
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_results());
    }

    #[test]
    fn test_print_summary_json_does_not_panic() {
        let report = SummaryReport::new(Domain::Transport, Vec::new());
        print_summary_json(&report).unwrap();
    }

    #[test]
    fn test_append_daily_results_creates_file() {
        let path = temp_path("emissions_rater_test_create.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        append_daily_results(&path, &sample_results()).unwrap();

        assert!(Path::new(&path).exists());
        let content = fs::read_to_string(&path).unwrap();
        assert!(!content.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_daily_results_writes_header_once() {
        let path = temp_path("emissions_rater_test_header.csv");
        let _ = fs::remove_file(&path);

        append_daily_results(&path, &sample_results()).unwrap();
        append_daily_results(&path, &sample_results()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.contains("entity")).count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_append_daily_results_two_rows() {
        let path = temp_path("emissions_rater_test_rows.csv");
        let _ = fs::remove_file(&path);

        append_daily_results(&path, &sample_results()).unwrap();
        append_daily_results(&path, &sample_results()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // 1 header + 2 data rows = 3 lines (last may be empty due to trailing newline)
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_summary_report_serializes_month_maps() {
        use crate::pipeline::aggregate::{GapPolicy, aggregate};
        use crate::pipeline::calendar::DayPartition;

        let months = aggregate(
            &sample_results(),
            &DayPartition::calendar(),
            Domain::Transport.spec().kinds,
            GapPolicy::Drop,
        )
        .unwrap();
        let report = SummaryReport::new(Domain::Transport, months);
        let json = serde_json::to_string_pretty(&report).unwrap();

        assert!(json.contains("\"January\""));
        assert!(json.contains("\"Low Risk\": \"100.00%\""));
        assert!(json.contains("\"schema_version\": 1"));
    }
}
