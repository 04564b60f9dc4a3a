//! Path resolution relative to the working directory
//!
//! A raw command-line path is turned into the absolute path used for every
//! filesystem call plus the name shown to the user. Paths under the working
//! directory (or its parent) are displayed in `./` (or `../`) notation.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ListError;

/// What a resolved path points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
}

/// A user-supplied path after resolution. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Path used for all filesystem operations
    pub path: PathBuf,
    /// Name shown to the user, keeping relative notation
    pub display_name: String,
    pub kind: PathKind,
}

impl ResolvedPath {
    pub fn is_dir(&self) -> bool {
        self.kind == PathKind::Directory
    }

    /// Display name of a child entry, as it would be typed relative to this path.
    pub fn child_display_name(&self, name: &str) -> String {
        if self.display_name.ends_with('/') {
            format!("{}{}", self.display_name, name)
        } else {
            format!("{}/{}", self.display_name, name)
        }
    }

    /// A subdirectory found while listing this path.
    ///
    /// `path` is kept exactly as enumerated; `name` only feeds the display name.
    pub fn child_dir(&self, path: PathBuf, name: &str) -> ResolvedPath {
        ResolvedPath {
            path,
            display_name: self.child_display_name(name),
            kind: PathKind::Directory,
        }
    }
}

/// Resolve `raw` against `cwd` and stat the result.
///
/// Fails with [`ListError::NotFound`] when the target cannot be stat'ed
/// (missing, permission denied, dangling symlink).
pub fn resolve(raw: &str, cwd: &Path) -> Result<ResolvedPath, ListError> {
    let (path, display_name) = rewrite(raw, cwd);
    debug!(raw, path = %path.display(), display = %display_name, "resolved path");

    let meta = fs::metadata(&path).map_err(|source| ListError::NotFound {
        path: raw.to_string(),
        source,
    })?;

    let kind = if meta.is_dir() {
        PathKind::Directory
    } else {
        PathKind::File
    };

    Ok(ResolvedPath {
        path,
        display_name,
        kind,
    })
}

/// Compute the absolute path and display name for `raw`, without touching the filesystem.
pub fn rewrite(raw: &str, cwd: &Path) -> (PathBuf, String) {
    let cwd_str = cwd.to_string_lossy();
    let parent = cwd.parent().unwrap_or(cwd);
    let parent_str = parent.to_string_lossy();

    // The working directory is the longer prefix, so it is tried first.
    let relative = if let Some(rest) = strip_dir_prefix(raw, &cwd_str) {
        format!(".{}", rest)
    } else if let Some(rest) = strip_dir_prefix(raw, &parent_str) {
        format!("..{}", rest)
    } else {
        raw.to_string()
    };

    if relative == ".." || relative.starts_with("../") {
        let suffix = trim_trailing_separators(&relative[2..]);
        (join_base(&parent_str, suffix), format!("..{}", suffix))
    } else if relative == "." || relative.starts_with("./") {
        let suffix = trim_trailing_separators(&relative[1..]);
        (join_base(&cwd_str, suffix), format!(".{}", suffix))
    } else {
        let trimmed = trim_trailing_separators(&relative);
        let name = if trimmed.is_empty() { relative.as_str() } else { trimmed };
        let candidate = Path::new(name);
        let path = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            cwd.join(candidate)
        };
        (path, name.to_string())
    }
}

/// Strip `dir` from the front of `raw` when it matches whole path segments.
fn strip_dir_prefix<'a>(raw: &'a str, dir: &str) -> Option<&'a str> {
    if dir.is_empty() || dir == "/" {
        return None;
    }
    let rest = raw.strip_prefix(dir)?;
    (rest.is_empty() || rest.starts_with('/')).then_some(rest)
}

fn trim_trailing_separators(suffix: &str) -> &str {
    suffix.trim_end_matches('/')
}

/// Concatenate a base directory with a `/`-prefixed (or empty) suffix.
fn join_base(base: &str, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        PathBuf::from(base)
    } else if base.ends_with('/') {
        PathBuf::from(format!("{}{}", base, &suffix[1..]))
    } else {
        PathBuf::from(format!("{}{}", base, suffix))
    }
}
