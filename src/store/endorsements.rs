//! Persisted skill → endorsers table.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{load_json, save_json, state_path, StoreError};

pub const ENDORSEMENTS_FILE: &str = "endorsements.json";

/// Skill (case-sensitive, as typed) to an insertion-ordered endorser list.
/// Serialized as a plain JSON object.
///
/// The table is stored exactly as read: entries are only ever appended, and
/// duplicate or blank endorsers already present in the file are written back
/// unchanged. Readers get a normalized view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EndorsementTable {
    entries: BTreeMap<String, Vec<String>>,
}

impl EndorsementTable {
    pub fn path_for(project_root: &Path) -> PathBuf {
        state_path(project_root, ENDORSEMENTS_FILE)
    }

    /// Load the table for a project. A missing file is an empty table.
    pub fn load(project_root: &Path) -> Result<Self, StoreError> {
        let path = Self::path_for(project_root);
        let table: Self = load_json(&path)?;
        debug!("Loaded {} endorsed skills from {}", table.entries.len(), path.display());
        Ok(table)
    }

    pub fn save(&self, project_root: &Path) -> Result<(), StoreError> {
        save_json(&Self::path_for(project_root), self)
    }

    /// Record an endorsement. Returns `false` when the endorser had already
    /// endorsed this exact skill. Blank input is ignored.
    pub fn endorse(&mut self, skill: &str, endorser: &str) -> bool {
        let (skill, endorser) = (skill.trim(), endorser.trim());
        if skill.is_empty() || endorser.is_empty() {
            return false;
        }
        let endorsers = self.entries.entry(skill.to_string()).or_default();
        if endorsers.iter().any(|e| e.trim() == endorser) {
            return false;
        }
        endorsers.push(endorser.to_string());
        true
    }

    /// Distinct, non-blank endorsers of `skill` (matched exactly), in the
    /// order they were first recorded.
    pub fn endorsers(&self, skill: &str) -> Vec<String> {
        self.entries.get(skill).map(|list| distinct(list)).unwrap_or_default()
    }

    /// Skills with at least one endorser, with their distinct endorsers.
    pub fn iter(&self) -> impl Iterator<Item = (&String, Vec<String>)> {
        self.entries
            .iter()
            .map(|(skill, list)| (skill, distinct(list)))
            .filter(|(_, endorsers)| !endorsers.is_empty())
    }

    /// Number of skills with at least one endorser.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn distinct(endorsers: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    endorsers
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty() && seen.insert(*e))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn endorsing_twice_keeps_one_entry() {
        let mut table = EndorsementTable::default();
        assert!(table.endorse("Go", "Rob"));
        assert!(!table.endorse("Go", "Rob"));
        assert_eq!(table.endorsers("Go"), ["Rob".to_string()]);
    }

    #[test]
    fn keys_and_endorsers_are_case_sensitive() {
        let mut table = EndorsementTable::default();
        table.endorse("React", "Dan");
        table.endorse("react", "Dan");
        table.endorse("React", "dan");
        assert_eq!(table.len(), 2);
        assert_eq!(table.endorsers("React"), ["Dan".to_string(), "dan".to_string()]);
        assert!(table.endorsers("REACT").is_empty());
    }

    #[test]
    fn missing_file_loads_empty_and_save_round_trips() {
        let tmp = TempDir::new().expect("tmp");
        let mut table = EndorsementTable::load(tmp.path()).expect("load");
        assert!(table.is_empty());
        assert!(!EndorsementTable::path_for(tmp.path()).exists());

        table.endorse("Rust", "Grace");
        table.endorse("Rust", "Linus");
        table.save(tmp.path()).expect("save");

        let raw = fs::read_to_string(EndorsementTable::path_for(tmp.path())).expect("read");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(json, serde_json::json!({"Rust": ["Grace", "Linus"]}));

        let reloaded = EndorsementTable::load(tmp.path()).expect("reload");
        assert_eq!(reloaded, table);
    }

    #[test]
    fn loaded_duplicates_are_collapsed_for_display() {
        let tmp = TempDir::new().expect("tmp");
        let path = EndorsementTable::path_for(tmp.path());
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, r#"{"Go": ["Rob", "Ken", "Rob"], "Empty": []}"#).expect("write");

        let table = EndorsementTable::load(tmp.path()).expect("load");
        assert_eq!(table.endorsers("Go"), ["Rob".to_string(), "Ken".to_string()]);
        assert_eq!(table.len(), 1);
        let listed: Vec<&String> = table.iter().map(|(skill, _)| skill).collect();
        assert_eq!(listed, ["Go"]);
    }

    #[test]
    fn saving_keeps_loaded_entries_unpruned() {
        let tmp = TempDir::new().expect("tmp");
        let path = EndorsementTable::path_for(tmp.path());
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, r#"{"Go": ["Rob", "Ken", "Rob"], "Empty": []}"#).expect("write");

        let mut table = EndorsementTable::load(tmp.path()).expect("load");
        assert!(table.endorse("Rust", "Grace"));
        assert!(!table.endorse("Go", "Rob"));
        table.save(tmp.path()).expect("save");

        let raw = fs::read_to_string(&path).expect("read");
        let json: serde_json::Value = serde_json::from_str(&raw).expect("json");
        assert_eq!(
            json,
            serde_json::json!({"Go": ["Rob", "Ken", "Rob"], "Empty": [], "Rust": ["Grace"]})
        );
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = TempDir::new().expect("tmp");
        let path = EndorsementTable::path_for(tmp.path());
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(&path, "[\"not\", \"an object\"]").expect("write");
        assert!(matches!(EndorsementTable::load(tmp.path()), Err(StoreError::Malformed { .. })));
    }
}
