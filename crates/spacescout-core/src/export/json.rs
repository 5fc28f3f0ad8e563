/// JSON export for scripting.
use super::{bucket_rows, file_rows, ReportRow};
use crate::error::Result;
use crate::model::{format_size, ReportData, ScanStats};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct JsonWarning {
    root: String,
    message: String,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    total_bytes: u64,
    total_human: String,
    cancelled: bool,
    duration_ms: u128,
    stats: &'a ScanStats,
    warnings: Vec<JsonWarning>,
    buckets: Vec<ReportRow>,
    top_files: Vec<ReportRow>,
}

/// Write the report as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(report: &ReportData, top_dirs: usize, mut writer: W) -> Result<()> {
    let doc = JsonReport {
        total_bytes: report.total_bytes,
        total_human: format_size(report.total_bytes),
        cancelled: report.cancelled,
        duration_ms: report.duration.as_millis(),
        stats: &report.stats,
        warnings: report
            .warnings
            .iter()
            .map(|w| JsonWarning {
                root: w.root.to_string_lossy().into_owned(),
                message: w.message.clone(),
            })
            .collect(),
        buckets: bucket_rows(report, top_dirs),
        top_files: file_rows(report),
    };
    serde_json::to_writer_pretty(&mut writer, &doc)?;
    writeln!(writer).map_err(serde_json::Error::io)?;
    Ok(())
}
