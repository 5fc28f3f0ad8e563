/// Scanner module: walks roots and aggregates directory buckets and the
/// largest files.
///
/// The walk itself ([`walker::scan`]) is synchronous and single-threaded.
/// [`start_scan`] moves that one walk onto a background thread so a frontend
/// can render progress while it runs; the report is still built and owned
/// by exactly one thread and handed over whole when the walk ends.
pub mod filter;
pub mod options;
pub mod progress;
pub mod walker;

pub use filter::FileFilter;
pub use options::{ScanOptions, DEFAULT_EXCLUDES, DEFAULT_MAX_DEPTH, DEFAULT_TOP_FILES};
pub use walker::{scan, scan_roots, scan_with, ScanControl};

use crate::error::{Result, ScoutError};
use crate::model::ReportData;
use crossbeam_channel::Receiver;
use progress::ScanProgress;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Maximum number of progress messages that may queue up in the channel.
///
/// If the frontend stops draining, the scanner blocks on `send` rather
/// than consuming unbounded heap.
pub const PROGRESS_CHANNEL_CAPACITY: usize = 4_096;

/// Handle to a running or completed scan. Allows cancellation and
/// receiving progress updates.
pub struct ScanHandle {
    /// Receiver for progress updates from the scan thread.
    pub progress_rx: Receiver<ScanProgress>,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the scan thread.
    thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    /// Request the scan to stop at its next checkpoint.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }

    /// The shared cancellation flag, e.g. for binding to a signal handler.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel_flag)
    }

    /// Block until the scan finishes and return its report.
    pub fn wait(self) -> Result<ReportData> {
        self.wait_with(|_| {})
    }

    /// Block until the scan finishes, passing every message (including the
    /// final one) to `on_progress` first.
    pub fn wait_with<F>(mut self, mut on_progress: F) -> Result<ReportData>
    where
        F: FnMut(&ScanProgress),
    {
        let rx = self.progress_rx.clone();
        for msg in rx.iter() {
            on_progress(&msg);
            if let ScanProgress::Complete(report) | ScanProgress::Cancelled(report) = msg {
                self.join_thread();
                return Ok(*report);
            }
        }
        self.join_thread();
        Err(ScoutError::Disconnected)
    }

    fn join_thread(&mut self) {
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                error!("Scanner thread panicked");
            }
        }
    }
}

/// Start a new scan on a background thread.
///
/// Options are validated before the thread is spawned, so malformed input
/// is reported synchronously. The final message on the channel is
/// `Complete` or `Cancelled`, each carrying the report.
pub fn start_scan(options: ScanOptions) -> Result<ScanHandle> {
    options.validate()?;

    let (progress_tx, progress_rx) =
        crossbeam_channel::bounded::<ScanProgress>(PROGRESS_CHANNEL_CAPACITY);
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let control = ScanControl::new()
        .with_cancel_flag(Arc::clone(&cancel_flag))
        .with_progress(progress_tx.clone());

    let thread = thread::Builder::new()
        .name("spacescout-scanner".into())
        .spawn(move || {
            info!("Scanner thread started");
            match scan_with(&options, &control) {
                Ok(report) if report.cancelled => {
                    let _ = progress_tx.send(ScanProgress::Cancelled(Box::new(report)));
                }
                Ok(report) => {
                    let _ = progress_tx.send(ScanProgress::Complete(Box::new(report)));
                }
                Err(err) => error!("Scan failed: {err}"),
            }
        })
        .map_err(ScoutError::Spawn)?;

    Ok(ScanHandle {
        progress_rx,
        cancel_flag,
        thread: Some(thread),
    })
}
