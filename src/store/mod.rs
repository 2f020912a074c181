//! Small JSON files persisted under `<project>/.repo-resume/`.
//!
//! Each file is read whole, mutated in memory, and written back whole. A
//! missing file is the empty state, never an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod endorsements;
pub mod preferences;

pub use endorsements::EndorsementTable;
pub use preferences::Preferences;

/// Directory, relative to the project root, holding persisted state.
pub const STATE_DIR: &str = ".repo-resume";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Path of a state file under the project root.
pub fn state_path(project_root: &Path, file_name: &str) -> PathBuf {
    project_root.join(STATE_DIR).join(file_name)
}

pub(crate) fn load_json<T>(path: &Path) -> Result<T, StoreError>
where
    T: DeserializeOwned + Default,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(source) => return Err(StoreError::Read { path: path.to_path_buf(), source }),
    };
    if content.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&content)
        .map_err(|source| StoreError::Malformed { path: path.to_path_buf(), source })
}

pub(crate) fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write { path: path.to_path_buf(), source };
    let mut json = serde_json::to_string_pretty(value)
        .map_err(|source| StoreError::Malformed { path: path.to_path_buf(), source })?;
    json.push('\n');
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, json).map_err(write_err)
}
