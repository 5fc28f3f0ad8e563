/// Export of a finished report as flat ranked rows shared by the CSV and
/// JSON writers.
///
/// Directory buckets are ranked descending and truncated to the caller's
/// display limit; every tracked top file is exported.
pub mod csv;
pub mod json;

pub use self::csv::{export_csv_file, write_csv, CSV_HEADER};
pub use self::json::write_json;

use crate::model::{format_size, ReportData};
use serde::Serialize;
use std::path::Path;

/// Which section of the report a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Dir,
    File,
}

/// One ranked line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub kind: RowKind,
    /// 1-based rank within its kind.
    pub rank: usize,
    pub size_bytes: u64,
    pub size_human: String,
    pub path: String,
}

impl ReportRow {
    fn new(kind: RowKind, rank: usize, size: u64, path: &Path) -> Self {
        Self {
            kind,
            rank,
            size_bytes: size,
            size_human: format_size(size),
            path: path.to_string_lossy().into_owned(),
        }
    }
}

/// The top `top_dirs` buckets, descending.
pub fn bucket_rows(report: &ReportData, top_dirs: usize) -> Vec<ReportRow> {
    report
        .top_buckets(top_dirs)
        .into_iter()
        .enumerate()
        .map(|(i, (path, size))| ReportRow::new(RowKind::Dir, i + 1, size, path))
        .collect()
}

/// All tracked top files, descending.
pub fn file_rows(report: &ReportData) -> Vec<ReportRow> {
    report
        .top_files
        .iter()
        .enumerate()
        .map(|(i, f)| ReportRow::new(RowKind::File, i + 1, f.size, &f.path))
        .collect()
}
