/// Error types for the SpaceScout core.
///
/// Per-root and per-entry filesystem problems never become errors; the
/// walker records or skips them. Errors are reserved for malformed options
/// and for failures while writing an exported report.
use std::path::PathBuf;
use thiserror::Error;

/// Shared `Result` alias for the core crate.
pub type Result<T> = std::result::Result<T, ScoutError>;

#[derive(Debug, Error)]
pub enum ScoutError {
    /// Options rejected before the walk starts.
    #[error("invalid scan options: {details}")]
    InvalidOptions { details: String },

    #[error("I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to spawn scanner thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// The scanner thread exited without sending a final report.
    #[error("scanner thread exited without a report")]
    Disconnected,
}

impl ScoutError {
    pub(crate) fn invalid(details: impl Into<String>) -> Self {
        Self::InvalidOptions {
            details: details.into(),
        }
    }

    /// Wrap an `io::Error` with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// `true` for errors caused by the caller's arguments rather than the
    /// environment. Frontends map these to a usage exit code.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::InvalidOptions { .. })
    }
}
