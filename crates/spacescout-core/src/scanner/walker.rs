/// Single-threaded tree walker, the aggregation core.
///
/// Walks each root top-down with `jwalk` in serial mode, never following
/// symlinks. Exclusions and device boundaries are enforced inside
/// `process_read_dir`: a pruned directory has its `read_children_path`
/// cleared, so its contents are never listed or stat'ed.
///
/// For every regular file the walker takes one `lstat`, adds the size to the
/// bucket of the containing directory and to the grand total, and offers the
/// file to the top-files tracker. Accumulation is commutative, so the final
/// report does not depend on directory listing order.
///
/// Nothing below the root level is fatal: unreadable directories and failed
/// stats are skipped and counted, missing roots become warnings.
use super::options::ScanOptions;
use super::progress::ScanProgress;
use crate::error::Result;
use crate::model::{ReportData, ScanStats, ScanWarning, TopFiles};
use crate::paths::{bucket_for, normalize_paths, ExcludeSet};
use crossbeam_channel::Sender;
use jwalk::WalkDirGeneric;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Per-entry client state: `true` marks a directory pruned during
/// `process_read_dir`.
type ScoutWalkDir = WalkDirGeneric<((), bool)>;

/// Number of walked entries between `ScanProgress::Update` messages.
const PROGRESS_INTERVAL: u64 = 5_000;

const MISSING_ROOT: &str = "Root is not a directory or does not exist";

/// Optional hooks into a running scan: a cancellation flag polled between
/// directory visits, and a channel for progress messages.
#[derive(Debug, Clone, Default)]
pub struct ScanControl {
    cancel_flag: Option<Arc<AtomicBool>>,
    progress_tx: Option<Sender<ScanProgress>>,
}

impl ScanControl {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, tx: Sender<ScanProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn send(&self, msg: ScanProgress) {
        if let Some(tx) = &self.progress_tx {
            // A dropped receiver only means nobody is watching.
            let _ = tx.send(msg);
        }
    }
}

/// Scan with the exact four-argument contract: roots, exclusions, bucket
/// depth, and top-K limit. Paths are raw and normalised here.
pub fn scan_roots<R, E, P, Q>(
    roots: R,
    excludes: E,
    max_depth: usize,
    top_k: usize,
) -> Result<ReportData>
where
    R: IntoIterator<Item = P>,
    E: IntoIterator<Item = Q>,
    P: Into<PathBuf>,
    Q: Into<PathBuf>,
{
    let options = ScanOptions::new(roots)
        .excludes(excludes)
        .max_depth(max_depth)
        .top_files(top_k);
    scan(&options)
}

/// Scan synchronously on the calling thread.
pub fn scan(options: &ScanOptions) -> Result<ReportData> {
    scan_with(options, &ScanControl::default())
}

/// Scan synchronously, honouring `control`'s cancellation flag and
/// reporting progress on its channel.
///
/// Fails only if `options` are invalid.
pub fn scan_with(options: &ScanOptions, control: &ScanControl) -> Result<ReportData> {
    options.validate()?;
    let start = Instant::now();

    let roots = normalize_paths(&options.roots);
    let excludes = Arc::new(ExcludeSet::new(&options.excludes));
    info!(
        "Scanning {} root(s), {} exclusion(s), max depth {}",
        roots.len(),
        excludes.len(),
        options.max_depth
    );

    let mut acc = Accumulator::new(options.top_files);
    let mut walkable: Vec<PathBuf> = Vec::with_capacity(roots.len());
    for root in roots {
        if !root.is_dir() {
            acc.warn(
                control,
                ScanWarning {
                    root,
                    message: MISSING_ROOT.to_string(),
                },
            );
            acc.stats.roots_skipped += 1;
            continue;
        }
        if excludes.is_excluded(&root) {
            debug!("Root {} is excluded, skipping", root.display());
            acc.stats.dirs_pruned += 1;
            continue;
        }
        walkable.push(root);
    }

    // Only roots that will actually be walked can be counted twice.
    for warning in overlapping_roots(&walkable) {
        acc.warn(control, warning);
    }

    let mut cancelled = false;
    for root in &walkable {
        if control.is_cancelled() {
            cancelled = true;
            break;
        }
        if walk_root(root, options, &excludes, control, &mut acc) == WalkOutcome::Cancelled {
            cancelled = true;
            break;
        }
    }

    let report = acc.finish(cancelled, start.elapsed());
    info!(
        "Scan {} in {:?}: {} files, {} bytes, {} buckets",
        if report.cancelled { "cancelled" } else { "complete" },
        report.duration,
        report.stats.files_counted,
        report.total_bytes,
        report.dir_sizes.len()
    );
    Ok(report)
}

#[derive(Debug, PartialEq, Eq)]
enum WalkOutcome {
    Finished,
    Cancelled,
}

/// Walk one normalised, existing, non-excluded root.
fn walk_root(
    root: &Path,
    options: &ScanOptions,
    excludes: &Arc<ExcludeSet>,
    control: &ScanControl,
    acc: &mut Accumulator,
) -> WalkOutcome {
    debug!("Walking {}", root.display());

    let root_device = if options.one_file_system {
        device_id(root)
    } else {
        None
    };
    let prune_set = Arc::clone(excludes);

    let walker = ScoutWalkDir::new(root)
        .skip_hidden(false)
        .follow_links(false)
        .sort(false)
        .parallelism(jwalk::Parallelism::Serial)
        .process_read_dir(move |_depth, _dir, _state, children| {
            for child in children.iter_mut().flatten() {
                if !child.file_type.is_dir() {
                    continue;
                }
                // Links are never followed, so a child of a canonical
                // directory is itself canonical.
                let path = child.path();
                let off_device = root_device
                    .is_some_and(|dev| device_id(&path).is_some_and(|d| d != dev));
                if off_device || prune_set.is_excluded(&path) {
                    child.read_children_path = None;
                    child.client_state = true;
                }
            }
        });

    let mut entries_seen: u64 = 0;
    let mut last_dir: Option<(PathBuf, PathBuf)> = None;

    for entry_result in walker {
        // Counted once per walked entry, whatever its fate below.
        entries_seen += 1;
        if entries_seen.is_multiple_of(PROGRESS_INTERVAL) {
            let current = entry_result
                .as_ref()
                .map_or_else(|_| root.to_path_buf(), |e| e.path());
            acc.report_progress(control, &current);
        }

        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                // Typically permission denied while listing a directory.
                acc.stats.entries_skipped += 1;
                debug!("Skipping unreadable entry: {err}");
                continue;
            }
        };

        if entry.file_type.is_dir() {
            // Cooperative cancellation checkpoint between directory visits.
            if control.is_cancelled() {
                return WalkOutcome::Cancelled;
            }
            if entry.client_state {
                acc.stats.dirs_pruned += 1;
                debug!("Pruned {}", entry.path().display());
            } else {
                acc.stats.dirs_visited += 1;
            }
            continue;
        }

        // Symlinks, sockets, FIFOs, and device nodes never count.
        if !entry.file_type.is_file() {
            continue;
        }

        let path = entry.path();
        let meta = match std::fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(err) => {
                acc.stats.entries_skipped += 1;
                debug!("Cannot stat {}: {err}", path.display());
                continue;
            }
        };
        // Re-check: the entry may have been replaced since it was listed.
        if !meta.file_type().is_file() {
            continue;
        }

        let size = meta.len();
        if options.filter.is_active()
            && !options.filter.matches(&path, size, meta.modified().ok())
        {
            acc.stats.files_filtered += 1;
            continue;
        }

        let parent: &Path = &entry.parent_path;
        let bucket = match &last_dir {
            Some((dir, bucket)) if dir.as_path() == parent => bucket.clone(),
            _ => {
                let bucket = bucket_for(root, parent, options.max_depth);
                last_dir = Some((parent.to_path_buf(), bucket.clone()));
                bucket
            }
        };
        acc.add_file(bucket, size, &path);
    }

    WalkOutcome::Finished
}

/// Mutable scan state, owned by the walking thread only.
struct Accumulator {
    dir_sizes: BTreeMap<PathBuf, u64>,
    top_files: TopFiles,
    total_bytes: u64,
    stats: ScanStats,
    warnings: Vec<ScanWarning>,
}

impl Accumulator {
    fn new(top_limit: usize) -> Self {
        Self {
            dir_sizes: BTreeMap::new(),
            top_files: TopFiles::new(top_limit),
            total_bytes: 0,
            stats: ScanStats::default(),
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, control: &ScanControl, warning: ScanWarning) {
        warn!("{warning}");
        control.send(ScanProgress::Warning(warning.clone()));
        self.warnings.push(warning);
    }

    fn report_progress(&self, control: &ScanControl, current: &Path) {
        control.send(ScanProgress::Update {
            files_found: self.stats.files_counted,
            dirs_found: self.stats.dirs_visited,
            total_size: self.total_bytes,
            current_path: current.to_string_lossy().into_owned(),
        });
    }

    fn add_file(&mut self, bucket: PathBuf, size: u64, path: &Path) {
        *self.dir_sizes.entry(bucket).or_insert(0) += size;
        self.total_bytes += size;
        self.stats.files_counted += 1;
        self.top_files.offer(size, path);
    }

    fn finish(self, cancelled: bool, duration: std::time::Duration) -> ReportData {
        ReportData {
            dir_sizes: self.dir_sizes,
            top_files: self.top_files.into_sorted_vec(),
            total_bytes: self.total_bytes,
            stats: self.stats,
            warnings: self.warnings,
            cancelled,
            duration,
        }
    }
}

/// Roots nested inside other roots: their files will be counted twice.
fn overlapping_roots(roots: &[PathBuf]) -> Vec<ScanWarning> {
    let mut warnings = Vec::new();
    for (i, inner) in roots.iter().enumerate() {
        if let Some(outer) = roots
            .iter()
            .enumerate()
            .find(|&(j, outer)| i != j && inner.starts_with(outer))
            .map(|(_, outer)| outer)
        {
            warnings.push(ScanWarning {
                root: inner.clone(),
                message: format!(
                    "Root lies inside {} and will be counted twice",
                    outer.display()
                ),
            });
        }
    }
    warnings
}

#[cfg(unix)]
fn device_id(path: &Path) -> Option<u64> {
    use std::os::unix::fs::MetadataExt;
    std::fs::symlink_metadata(path).ok().map(|m| m.dev())
}

#[cfg(not(unix))]
fn device_id(_path: &Path) -> Option<u64> {
    None
}
