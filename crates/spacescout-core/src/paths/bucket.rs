/// Depth-limited bucket mapping.
///
/// Every directory under a scan root maps onto its ancestor at most
/// `max_depth` components below the root. Deeper directories collapse onto
/// that ancestor, trading granularity for a bounded number of buckets.
use std::path::{Path, PathBuf};

/// Map `directory` to its bucket under `root`.
///
/// - `directory == root` → `root` (depth 0).
/// - Otherwise `root` joined with the first `min(depth, max_depth)`
///   components of `directory` relative to `root`.
///
/// `max_depth = 0` collapses everything onto `root`; a very large
/// `max_depth` is simply capped by the real depth. A directory outside
/// `root` maps to `root`.
pub fn bucket_for(root: &Path, directory: &Path, max_depth: usize) -> PathBuf {
    if directory == root {
        return root.to_path_buf();
    }
    let Ok(relative) = directory.strip_prefix(root) else {
        return root.to_path_buf();
    };
    let mut bucket = root.to_path_buf();
    bucket.extend(relative.components().take(max_depth));
    bucket
}

/// Number of components of `bucket` below `root`, or `None` if `bucket`
/// is not under `root`.
pub fn bucket_depth(root: &Path, bucket: &Path) -> Option<usize> {
    bucket
        .strip_prefix(root)
        .ok()
        .map(|rel| rel.components().count())
}
