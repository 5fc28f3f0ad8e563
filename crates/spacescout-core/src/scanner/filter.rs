/// Optional predicates a regular file must satisfy to be counted.
///
/// With no predicates set every regular file passes. When any predicate is
/// set, a rejected file contributes to nothing: not the grand total, not a
/// bucket, not the top files.
///
/// Semantics:
/// - name terms: case-insensitive substring of the file name, OR-ed.
/// - path terms: case-insensitive substring of the full path, OR-ed.
/// - pattern: regex searched anywhere in the full path.
/// - extensions: case-insensitive, without the leading dot.
/// - size bounds: inclusive.
/// - time bounds: inclusive; a file without an mtime passes them.
use regex::Regex;
use std::path::Path;
use std::time::SystemTime;

#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    name_terms: Vec<String>,
    path_terms: Vec<String>,
    pattern: Option<Regex>,
    extensions: Vec<String>,
    min_size: Option<u64>,
    max_size: Option<u64>,
    modified_after: Option<SystemTime>,
    modified_before: Option<SystemTime>,
}

impl FileFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.name_terms = lowercase_nonempty(terms);
        self
    }

    #[must_use]
    pub fn path_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.path_terms = lowercase_nonempty(terms);
        self
    }

    #[must_use]
    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Accepts `log`, `.log`, or `LOG` alike.
    #[must_use]
    pub fn extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = exts
            .into_iter()
            .map(|e| e.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    #[must_use]
    pub fn min_size(mut self, bytes: u64) -> Self {
        self.min_size = Some(bytes);
        self
    }

    #[must_use]
    pub fn max_size(mut self, bytes: u64) -> Self {
        self.max_size = Some(bytes);
        self
    }

    #[must_use]
    pub fn modified_after(mut self, time: SystemTime) -> Self {
        self.modified_after = Some(time);
        self
    }

    #[must_use]
    pub fn modified_before(mut self, time: SystemTime) -> Self {
        self.modified_before = Some(time);
        self
    }

    /// `true` if at least one predicate is set.
    pub fn is_active(&self) -> bool {
        !self.name_terms.is_empty()
            || !self.path_terms.is_empty()
            || self.pattern.is_some()
            || !self.extensions.is_empty()
            || self.min_size.is_some()
            || self.max_size.is_some()
            || self.modified_after.is_some()
            || self.modified_before.is_some()
    }

    /// Check that the bounds describe a non-empty range.
    pub fn validate(&self) -> Result<(), String> {
        if let (Some(min), Some(max)) = (self.min_size, self.max_size) {
            if min > max {
                return Err(format!("minimum size {min} exceeds maximum size {max}"));
            }
        }
        if let (Some(after), Some(before)) = (self.modified_after, self.modified_before) {
            if after > before {
                return Err("modified-after bound is later than modified-before bound".into());
            }
        }
        Ok(())
    }

    /// Does the regular file at `path` pass every active predicate?
    pub fn matches(&self, path: &Path, size: u64, modified: Option<SystemTime>) -> bool {
        if let Some(min) = self.min_size {
            if size < min {
                return false;
            }
        }
        if let Some(max) = self.max_size {
            if size > max {
                return false;
            }
        }

        if let Some(mtime) = modified {
            if self.modified_after.is_some_and(|after| mtime < after) {
                return false;
            }
            if self.modified_before.is_some_and(|before| mtime > before) {
                return false;
            }
        }

        if !self.extensions.is_empty() {
            let ext = path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if !self.extensions.iter().any(|wanted| *wanted == ext) {
                return false;
            }
        }

        if !self.name_terms.is_empty() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_lowercase())
                .unwrap_or_default();
            if !self.name_terms.iter().any(|t| name.contains(t.as_str())) {
                return false;
            }
        }

        if !self.path_terms.is_empty() || self.pattern.is_some() {
            let full = path.to_string_lossy();
            if !self.path_terms.is_empty() {
                let lower = full.to_lowercase();
                if !self.path_terms.iter().any(|t| lower.contains(t.as_str())) {
                    return false;
                }
            }
            if let Some(re) = &self.pattern {
                if !re.is_match(&full) {
                    return false;
                }
            }
        }

        true
    }
}

fn lowercase_nonempty<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
