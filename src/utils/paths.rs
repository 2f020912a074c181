//! Path normalization

use std::path::Path;

/// Forward-slash form of a path string.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

/// `path` relative to `root`, forward-slashed. Paths outside `root` are
/// returned whole.
pub fn relative_display(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    normalize_path(&rel.to_string_lossy())
}
