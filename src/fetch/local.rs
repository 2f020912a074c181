//! Local path validation and repository root discovery.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

/// Walk up from `start` looking for a directory containing `.git`.
pub fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let found = start.ancestors().find(|dir| dir.join(".git").exists())?.to_path_buf();
    if found != start {
        info!("Using repository root {} (detected from {})", found.display(), start.display());
    }
    Some(found)
}

/// Canonicalize `path` and require it to be an existing directory.
pub fn validate_local_path(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        anyhow::bail!("Path does not exist: {}", path.display());
    }
    let canonical = path.canonicalize()?;
    if !canonical.is_dir() {
        anyhow::bail!("Path is not a directory: {}", path.display());
    }
    Ok(canonical)
}

/// Repository root for `path`, or the validated directory itself when no
/// `.git` ancestor exists (the pipeline reports that case).
pub fn resolve_project_root(path: &Path) -> Result<PathBuf> {
    let dir = validate_local_path(path)?;
    Ok(find_repo_root(&dir).unwrap_or(dir))
}
