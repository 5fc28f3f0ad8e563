/// Scan configuration for a single scan.
use super::filter::FileFilter;
use crate::error::{Result, ScoutError};
use std::path::PathBuf;

/// Default bucket depth below each root.
pub const DEFAULT_MAX_DEPTH: usize = 2;

/// Default number of largest files retained.
pub const DEFAULT_TOP_FILES: usize = 50;

/// Pseudo-filesystems and scratch areas skipped by a whole-system scan.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "/proc",
    "/sys",
    "/dev",
    "/run",
    "/tmp",
    "/var/tmp",
    "/lost+found",
];

/// Everything a single scan needs. Paths are raw, as the user typed them;
/// the walker normalises them.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub roots: Vec<PathBuf>,
    pub excludes: Vec<PathBuf>,
    /// Bucket depth below each root (0 = one bucket per root).
    pub max_depth: usize,
    /// Top-K limit for the largest files (0 disables tracking).
    pub top_files: usize,
    /// Do not descend into directories on another device than their root.
    pub one_file_system: bool,
    pub filter: FileFilter,
}

impl Default for ScanOptions {
    /// A whole-system scan of `/` with the default exclusions.
    fn default() -> Self {
        Self {
            roots: vec![PathBuf::from("/")],
            excludes: DEFAULT_EXCLUDES.iter().map(PathBuf::from).collect(),
            max_depth: DEFAULT_MAX_DEPTH,
            top_files: DEFAULT_TOP_FILES,
            one_file_system: false,
            filter: FileFilter::default(),
        }
    }
}

impl ScanOptions {
    /// Scan the given roots with no exclusions and default limits.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            excludes: Vec::new(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn excludes<I, P>(mut self, excludes: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn top_files(mut self, limit: usize) -> Self {
        self.top_files = limit;
        self
    }

    #[must_use]
    pub fn one_file_system(mut self, enabled: bool) -> Self {
        self.one_file_system = enabled;
        self
    }

    #[must_use]
    pub fn filter(mut self, filter: FileFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Reject options that make the scan meaningless. Called by the walker
    /// before any filesystem access.
    pub fn validate(&self) -> Result<()> {
        if self.roots.iter().all(|r| r.as_os_str().is_empty()) {
            return Err(ScoutError::invalid("at least one root path is required"));
        }
        self.filter.validate().map_err(ScoutError::invalid)
    }
}
