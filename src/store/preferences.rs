//! Remembered choices between runs (currently the last profile-import handle).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{load_json, save_json, state_path, StoreError};

pub const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_github_handle: Option<String>,
}

impl Preferences {
    pub fn path_for(project_root: &Path) -> PathBuf {
        state_path(project_root, PREFERENCES_FILE)
    }

    pub fn load(project_root: &Path) -> Result<Self, StoreError> {
        load_json(&Self::path_for(project_root))
    }

    pub fn save(&self, project_root: &Path) -> Result<(), StoreError> {
        save_json(&Self::path_for(project_root), self)
    }

    /// Remember `handle`; returns `true` when it changed.
    pub fn remember_handle(&mut self, handle: &str) -> bool {
        let handle = handle.trim();
        if handle.is_empty() || self.last_github_handle.as_deref() == Some(handle) {
            return false;
        }
        self.last_github_handle = Some(handle.to_string());
        true
    }
}
