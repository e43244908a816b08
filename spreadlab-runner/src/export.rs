//! Report export: pretty JSON for the full report, CSV for the overview
//! records.
//!
//! NaN statistics serialise as JSON `null`; in CSV they are written as `NaN`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use spreadlab_core::GroupSummaryRecord;

use crate::report::AnalysisReport;

pub const REPORT_FILE: &str = "report.json";
pub const SUMMARIES_FILE: &str = "summaries.csv";

/// Serialize an `AnalysisReport` to pretty JSON.
pub fn export_json(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AnalysisReport to JSON")
}

/// Export overview records as CSV.
///
/// Columns: group, name, label, low, high, open, close, color
pub fn export_summaries_csv(records: &[GroupSummaryRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "group", "name", "label", "low", "high", "open", "close", "color",
    ])?;

    for r in records {
        wtr.write_record([
            &r.group_key.to_string(),
            &r.name,
            &r.label,
            &format!("{:.6}", r.low),
            &format!("{:.6}", r.high),
            &format!("{:.6}", r.open),
            &format!("{:.6}", r.close),
            &r.color.css(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Write `report.json` and `summaries.csv` into `output_dir`, creating it
/// if needed. Returns the directory.
pub fn write_report(report: &AnalysisReport, output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let json = export_json(report)?;
    let json_path = output_dir.join(REPORT_FILE);
    std::fs::write(&json_path, json)
        .with_context(|| format!("failed to write {}", json_path.display()))?;

    let csv = export_summaries_csv(&report.summaries)?;
    let csv_path = output_dir.join(SUMMARIES_FILE);
    std::fs::write(&csv_path, csv)
        .with_context(|| format!("failed to write {}", csv_path.display()))?;

    tracing::info!(dir = %output_dir.display(), "report written");
    Ok(output_dir.to_path_buf())
}
