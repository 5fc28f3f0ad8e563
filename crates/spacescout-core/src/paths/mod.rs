/// Path handling for the scanner: normalisation, prefix exclusion, and
/// depth-limited bucket mapping.
///
/// Everything here is a pure function of its inputs (plus the filesystem's
/// current symlink state for normalisation).
pub mod bucket;
pub mod exclude;
pub mod normalize;

pub use bucket::{bucket_depth, bucket_for};
pub use exclude::ExcludeSet;
pub use normalize::{normalize_path, normalize_paths};
