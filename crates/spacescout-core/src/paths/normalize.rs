/// Resolve user-supplied paths to canonical absolute form.
///
/// Canonical paths make prefix comparison meaningful: `/home/../etc`,
/// `./etc` run from `/`, and a symlink pointing at `/etc` all compare equal
/// to `/etc` once normalised.
use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

/// Normalise a list of raw paths.
///
/// Empty inputs are dropped, duplicates are removed keeping the first
/// occurrence, and the order of first occurrences is preserved.
/// Never fails: unresolvable paths fall back to a syntactic absolute form.
pub fn normalize_paths<I, P>(paths: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut out = Vec::new();
    for raw in paths {
        let raw = raw.as_ref();
        if raw.as_os_str().is_empty() {
            continue;
        }
        let resolved = normalize_path(raw);
        if seen.insert(resolved.clone()) {
            out.push(resolved);
        }
    }
    out
}

/// Normalise a single path: expand `~`, make absolute, resolve symlinks.
///
/// If `fs::canonicalize` fails (e.g. the path does not exist), the absolute
/// path is returned with `.` and `..` folded syntactically.
pub fn normalize_path(path: &Path) -> PathBuf {
    let expanded = expand_home(path);
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        env::current_dir().map_or_else(|_| expanded.clone(), |cwd| cwd.join(&expanded))
    };

    if let Ok(canonical) = std::fs::canonicalize(&absolute) {
        return canonical;
    }
    normalize_syntactic(&absolute)
}

/// Expand a leading `~` component to the user's home directory.
///
/// `~user` forms are left untouched.
fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match home_dir() {
            Some(home) => home.join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|h: &OsString| !h.is_empty())
        .map(PathBuf::from)
}

fn normalize_syntactic(path: &Path) -> PathBuf {
    let mut components = Vec::new();
    for component in path.components() {
        match component {
            Component::Prefix(..) | Component::RootDir | Component::Normal(_) => {
                components.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                if let Some(Component::Normal(_)) = components.last() {
                    components.pop();
                }
            }
        }
    }
    components.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_existing_path_canonically() {
        let cwd = env::current_dir().unwrap();
        let resolved = normalize_path(Path::new("."));
        assert_eq!(resolved, std::fs::canonicalize(&cwd).unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn missing_path_folds_dots_syntactically() {
        let input = Path::new("/nonexistent-spacescout/foo/../bar/./baz");
        assert!(std::fs::canonicalize(input).is_err());
        assert_eq!(
            normalize_path(input),
            PathBuf::from("/nonexistent-spacescout/bar/baz")
        );
    }

    #[cfg(unix)]
    #[test]
    fn parent_at_root_stays_at_root() {
        assert_eq!(normalize_syntactic(Path::new("/../foo")), PathBuf::from("/foo"));
    }

    #[test]
    fn empty_entries_dropped_and_duplicates_removed() {
        let cwd = std::fs::canonicalize(env::current_dir().unwrap()).unwrap();
        let out = normalize_paths(["", ".", "./", ""]);
        assert_eq!(out, vec![cwd]);
    }

    #[cfg(unix)]
    #[test]
    fn order_of_first_occurrence_preserved() {
        let out = normalize_paths(["/nonexistent-b", "/nonexistent-a", "/nonexistent-b/"]);
        assert_eq!(
            out,
            vec![
                PathBuf::from("/nonexistent-b"),
                PathBuf::from("/nonexistent-a")
            ]
        );
    }

    #[test]
    fn tilde_expands_to_home() {
        let Some(home) = home_dir() else { return };
        let expanded = expand_home(Path::new("~/some/dir"));
        assert_eq!(expanded, home.join("some/dir"));
        // Only a whole leading `~` component is expanded.
        assert_eq!(expand_home(Path::new("~other/x")), PathBuf::from("~other/x"));
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_resolved() {
        let tmp = tempfile::TempDir::new().unwrap();
        let real = tmp.path().join("real");
        std::fs::create_dir(&real).unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let out = normalize_paths([&link, &real]);
        assert_eq!(out, vec![std::fs::canonicalize(&real).unwrap()]);
    }
}
