/// The finished result of a scan, handed to the caller by value.
///
/// `ReportData` is produced once per scan and never mutated afterwards.
/// Rendering (tables, CSV, JSON) only reads from it.
use super::top_files::FileRecord;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Counters collected while walking. Informational only; none of them
/// affect the size totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    /// Regular files whose size was added to a bucket.
    pub files_counted: u64,
    /// Regular files rejected by the file filter.
    pub files_filtered: u64,
    /// Directories whose entries were listed.
    pub dirs_visited: u64,
    /// Directories pruned by an exclusion or a device boundary.
    pub dirs_pruned: u64,
    /// Entries skipped because a stat or directory read failed.
    pub entries_skipped: u64,
    /// Roots skipped because they were missing or not directories.
    pub roots_skipped: u64,
}

/// A recoverable, per-root problem reported during the scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanWarning {
    pub root: PathBuf,
    pub message: String,
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.message, self.root.display())
    }
}

/// Aggregated scan output.
#[derive(Debug, Clone, Default)]
pub struct ReportData {
    /// Bucket path → total bytes of regular files mapped to it.
    pub dir_sizes: BTreeMap<PathBuf, u64>,
    /// Largest files, sorted descending by size.
    pub top_files: Vec<FileRecord>,
    /// Total bytes of every counted regular file across all roots.
    pub total_bytes: u64,
    pub stats: ScanStats,
    pub warnings: Vec<ScanWarning>,
    /// `true` if the walk stopped early at a cancellation checkpoint.
    /// Totals then cover only what was visited before the stop.
    pub cancelled: bool,
    pub duration: Duration,
}

impl ReportData {
    /// The `n` largest buckets, descending by size.
    ///
    /// Ties are broken by path so the listing is stable between runs.
    pub fn top_buckets(&self, n: usize) -> Vec<(&Path, u64)> {
        let mut buckets: Vec<(&Path, u64)> = self
            .dir_sizes
            .iter()
            .map(|(path, &size)| (path.as_path(), size))
            .collect();
        buckets.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        buckets.truncate(n);
        buckets
    }

    /// Sum of all bucket totals. Equals `total_bytes` because every counted
    /// file lands in exactly one bucket.
    pub fn bucket_total(&self) -> u64 {
        self.dir_sizes.values().sum()
    }

    /// `true` if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.dir_sizes.is_empty() && self.top_files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ReportData {
        let mut report = ReportData::default();
        report.dir_sizes.insert(PathBuf::from("/r/b"), 300);
        report.dir_sizes.insert(PathBuf::from("/r/a"), 300);
        report.dir_sizes.insert(PathBuf::from("/r"), 50);
        report.dir_sizes.insert(PathBuf::from("/r/c"), 900);
        report.total_bytes = 1_550;
        report
    }

    #[test]
    fn top_buckets_sorted_descending_with_path_tiebreak() {
        let report = sample();
        let top = report.top_buckets(10);
        let paths: Vec<&str> = top.iter().map(|(p, _)| p.to_str().unwrap()).collect();
        assert_eq!(paths, vec!["/r/c", "/r/a", "/r/b", "/r"]);
    }

    #[test]
    fn top_buckets_truncates() {
        let report = sample();
        assert_eq!(report.top_buckets(2).len(), 2);
        assert!(report.top_buckets(0).is_empty());
    }

    #[test]
    fn bucket_total_matches_total_bytes() {
        let report = sample();
        assert_eq!(report.bucket_total(), report.total_bytes);
    }

    #[test]
    fn warning_display_names_root() {
        let w = ScanWarning {
            root: PathBuf::from("/missing"),
            message: "Root is not a directory or does not exist".into(),
        };
        assert_eq!(
            w.to_string(),
            "Root is not a directory or does not exist: /missing"
        );
    }
}
