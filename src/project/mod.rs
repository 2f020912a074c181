//! Project metadata: the manifest and README halves of a repository.

pub mod manifest;
pub mod readme;

use std::path::Path;

use crate::domain::ProjectMetadata;

pub use manifest::{normalize_repository_url, read_manifest};
pub use readme::{parse_readme, read_readme};

/// Read both halves independently; either may be absent without error.
pub fn read_project_metadata(root: &Path) -> ProjectMetadata {
    ProjectMetadata { manifest: read_manifest(root), readme: read_readme(root), remote_url: None }
}
