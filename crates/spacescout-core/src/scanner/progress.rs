/// Scan progress reporting: lightweight messages sent from the scan
/// thread to the frontend via a crossbeam channel.
use crate::model::{ReportData, ScanWarning};

/// Progress updates sent from the scan thread to the frontend.
#[derive(Debug)]
pub enum ScanProgress {
    /// Periodic update with running totals.
    Update {
        files_found: u64,
        dirs_found: u64,
        total_size: u64,
        current_path: String,
    },
    /// A root was skipped (missing or not a directory) or overlaps another.
    Warning(ScanWarning),
    /// Scanning completed; carries the finished report.
    Complete(Box<ReportData>),
    /// Scan was cancelled; carries the partial report.
    Cancelled(Box<ReportData>),
}

impl ScanProgress {
    /// `true` for the final message of a scan.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Cancelled(_))
    }
}
