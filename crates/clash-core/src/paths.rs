//! Path resolution shared by the classifier and the preview engine.
//!
//! Resolution is always the same three steps: expand a leading `~` to the
//! home directory, make relative paths absolute against the working
//! directory, then resolve symbolic links. A target that cannot be resolved
//! (missing file, dangling link, no home) yields an error and callers skip
//! it. It is neither a risk signal nor proof of safety.

use std::io;
use std::path::{Path, PathBuf};

/// Current user's home directory, if one can be determined.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Resolve `candidate` relative to `base`, expanding `~` to `home`.
///
/// # Errors
///
/// Returns an error if the candidate is empty, starts with `~` and no home
/// directory is given, or does not exist on disk.
pub fn resolve_path_with_home(
    base: &Path,
    candidate: &str,
    home: Option<&Path>,
) -> io::Result<PathBuf> {
    if candidate.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty path"));
    }

    let expanded = if let Some(rest) = candidate.strip_prefix('~') {
        let home = home.ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "home directory is not available")
        })?;
        home.join(rest.trim_start_matches('/'))
    } else {
        PathBuf::from(candidate)
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };

    std::fs::canonicalize(absolute)
}

/// Whether `path` is the repository root or lies beneath it.
///
/// Comparison is component-wise, so `/repo-other` is not inside `/repo`.
/// The root is canonicalized when possible so it compares equal to
/// resolved targets.
#[must_use]
pub fn is_inside(root: &Path, path: &Path) -> bool {
    if root.as_os_str().is_empty() {
        return false;
    }
    let canonical_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    path.starts_with(&canonical_root) || path.starts_with(root)
}

/// Expand a protected-path pattern.
///
/// - `~` and `~/rest` expand against `home`.
/// - `$VAR` and `$VAR/rest` expand through `lookup`; an unset or empty
///   variable leaves the pattern literal, which never matches a resolved
///   absolute path.
/// - Anything else is taken literally.
///
/// Returns `None` for an empty pattern or a `~` pattern with no home.
pub fn expand_pattern<F>(pattern: &str, home: Option<&Path>, lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    if pattern.is_empty() {
        return None;
    }

    if let Some(rest) = pattern.strip_prefix('~') {
        return home.map(|h| h.join(rest.trim_start_matches('/')));
    }

    if let Some(var_and_rest) = pattern.strip_prefix('$') {
        let (name, rest) = var_and_rest
            .split_once('/')
            .unwrap_or((var_and_rest, ""));
        return match lookup(name) {
            Some(value) if !value.is_empty() => {
                let base = PathBuf::from(value);
                Some(if rest.is_empty() { base } else { base.join(rest) })
            },
            _ => Some(PathBuf::from(pattern)),
        };
    }

    Some(PathBuf::from(pattern))
}

/// Whether `resolved` is textually prefixed by `pattern`.
///
/// Matching is a plain string prefix, so `~/.ssh` also covers
/// `~/.ssh_backup`. The pattern is tried both as written and canonicalized
/// (handles `/etc -> /private/etc` style links).
#[must_use]
pub fn has_prefix(resolved: &Path, pattern: &Path) -> bool {
    let resolved = resolved.to_string_lossy();
    if resolved.starts_with(pattern.to_string_lossy().as_ref()) {
        return true;
    }
    pattern
        .canonicalize()
        .is_ok_and(|c| resolved.starts_with(c.to_string_lossy().as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_relative_against_base() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("scratch.txt"), "x").unwrap();

        let resolved = resolve_path_with_home(dir.path(), "./scratch.txt", None).unwrap();
        assert_eq!(
            resolved,
            dir.path().canonicalize().unwrap().join("scratch.txt")
        );
    }

    #[test]
    fn test_resolve_missing_target_fails() {
        let dir = TempDir::new().unwrap();
        assert!(resolve_path_with_home(dir.path(), "nope", None).is_err());
        assert!(resolve_path_with_home(dir.path(), "", None).is_err());
    }

    #[test]
    fn test_resolve_tilde_uses_home() {
        let home = TempDir::new().unwrap();
        std::fs::create_dir(home.path().join("notes")).unwrap();
        let elsewhere = TempDir::new().unwrap();

        let resolved =
            resolve_path_with_home(elsewhere.path(), "~/notes", Some(home.path())).unwrap();
        assert_eq!(resolved, home.path().canonicalize().unwrap().join("notes"));

        let bare = resolve_path_with_home(elsewhere.path(), "~", Some(home.path())).unwrap();
        assert_eq!(bare, home.path().canonicalize().unwrap());

        assert!(resolve_path_with_home(elsewhere.path(), "~/notes", None).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_follows_symlinks() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("real");
        std::fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link")).unwrap();

        let resolved = resolve_path_with_home(dir.path(), "link", None).unwrap();
        assert_eq!(resolved, target.canonicalize().unwrap());
    }

    #[test]
    fn test_is_inside_is_component_wise() {
        let root = Path::new("/work/repo");
        assert!(is_inside(root, Path::new("/work/repo")));
        assert!(is_inside(root, Path::new("/work/repo/src/main.rs")));
        assert!(!is_inside(root, Path::new("/work/repo-other/file")));
        assert!(!is_inside(root, Path::new("/work")));
        assert!(!is_inside(Path::new(""), Path::new("/work")));
    }

    #[test]
    fn test_expand_pattern_forms() {
        let home = Path::new("/home/op");
        let lookup = |name: &str| match name {
            "DATA" => Some("/srv/data".to_string()),
            "EMPTY" => Some(String::new()),
            _ => None,
        };

        assert_eq!(
            expand_pattern("~/.ssh", Some(home), lookup),
            Some(PathBuf::from("/home/op/.ssh"))
        );
        assert_eq!(
            expand_pattern("$DATA", Some(home), lookup),
            Some(PathBuf::from("/srv/data"))
        );
        assert_eq!(
            expand_pattern("$DATA/secrets", Some(home), lookup),
            Some(PathBuf::from("/srv/data/secrets"))
        );
        assert_eq!(
            expand_pattern("$EMPTY", Some(home), lookup),
            Some(PathBuf::from("$EMPTY"))
        );
        assert_eq!(
            expand_pattern("/etc", Some(home), lookup),
            Some(PathBuf::from("/etc"))
        );
        assert_eq!(expand_pattern("", Some(home), lookup), None);
        assert_eq!(expand_pattern("~/.aws", None, lookup), None);
    }

    #[test]
    fn test_has_prefix_is_textual() {
        assert!(has_prefix(
            Path::new("/home/op/.ssh/id_ed25519"),
            Path::new("/home/op/.ssh")
        ));
        assert!(has_prefix(
            Path::new("/home/op/.ssh_backup"),
            Path::new("/home/op/.ssh")
        ));
        assert!(!has_prefix(Path::new("/home/op/src"), Path::new("/home/op/.ssh")));
    }
}
