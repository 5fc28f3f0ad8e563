/// SpaceScout Core: scanning, aggregation, and report export.
///
/// This crate contains all business logic with zero terminal dependencies.
/// It is designed to be reusable across different frontends (CLI, TUI, scripts).
///
/// # Modules
///
/// - [`paths`] — Path normalisation, prefix exclusion, and bucket mapping.
/// - [`model`] — Report data, the bounded top-files heap, and size formatting.
/// - [`scanner`] — The single-threaded tree walker, file filters, and the
///   background scan handle with progress reporting.
/// - [`export`] — CSV and JSON serialisation of a finished report.
pub mod error;
pub mod export;
pub mod model;
pub mod paths;
pub mod scanner;

pub use error::{Result, ScoutError};
pub use model::{FileRecord, ReportData, ScanStats, ScanWarning};
pub use scanner::{scan, scan_roots, scan_with, FileFilter, ScanControl, ScanOptions};
