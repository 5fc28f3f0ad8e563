/// Prefix exclusion for directory pruning.
///
/// A candidate is excluded when it equals an entry or lies below it on a
/// component boundary, so `/proc` excludes `/proc/1` but never `/procxyz`.
/// The walker consults this before listing a directory, which makes an
/// exclusion a hard prune: nothing beneath it is ever read or stat'ed.
use super::normalize::normalize_paths;
use std::path::{Path, PathBuf};

/// Immutable set of normalised exclusion prefixes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExcludeSet {
    prefixes: Vec<PathBuf>,
}

impl ExcludeSet {
    /// Build from raw, user-supplied paths (normalised here).
    pub fn new<I, P>(raw: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            prefixes: normalize_paths(raw),
        }
    }

    /// Build from paths that are already normalised.
    pub fn from_normalized(prefixes: Vec<PathBuf>) -> Self {
        Self { prefixes }
    }

    /// `true` if `candidate` (already normalised) is an excluded path or a
    /// descendant of one.
    pub fn is_excluded(&self, candidate: &Path) -> bool {
        // `Path::starts_with` compares whole components, which gives the
        // separator-bounded prefix match.
        self.prefixes
            .iter()
            .any(|prefix| candidate.starts_with(prefix))
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.prefixes.iter().map(PathBuf::as_path)
    }
}
