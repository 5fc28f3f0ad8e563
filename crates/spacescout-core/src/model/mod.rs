/// Data model for SpaceScout scan results.
///
/// Re-exports the report structure, the bounded top-files tracker, and
/// size formatting helpers.
pub mod report;
pub mod size;
pub mod top_files;

pub use report::{ReportData, ScanStats, ScanWarning};
pub use size::{format_count, format_size, parse_size};
pub use top_files::{FileRecord, TopFiles};
