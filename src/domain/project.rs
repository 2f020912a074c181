//! Normalized project metadata read from the manifest and README.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fields common to the supported manifest formats (`package.json`, `Cargo.toml`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub dependencies: BTreeMap<String, String>,
    pub dev_dependencies: BTreeMap<String, String>,
    pub scripts: BTreeMap<String, String>,
    pub keywords: Vec<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    /// Repository reference normalized to a browsable URL where possible.
    pub repository: Option<String>,
}

impl Manifest {
    /// Names of runtime and development dependencies, runtime first.
    pub fn dependency_names(&self) -> Vec<String> {
        self.dependencies.keys().chain(self.dev_dependencies.keys()).cloned().collect()
    }
}

/// Heuristic extraction from a README-like file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub sections: Vec<String>,
    pub technologies: Vec<String>,
    pub features: Vec<String>,
}

/// Manifest and README halves; either may be absent without error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    pub manifest: Option<Manifest>,
    pub readme: Option<ReadmeInfo>,
    /// `origin` remote URL, used when the manifest names no repository.
    #[serde(default)]
    pub remote_url: Option<String>,
}

impl ProjectMetadata {
    /// Best display name: manifest name, then README title.
    pub fn name(&self) -> Option<&str> {
        self.manifest
            .as_ref()
            .and_then(|m| m.name.as_deref())
            .or_else(|| self.readme.as_ref().and_then(|r| r.title.as_deref()))
            .filter(|s| !s.trim().is_empty())
    }

    /// Best description: README description, then manifest description.
    pub fn description(&self) -> Option<&str> {
        self.readme
            .as_ref()
            .and_then(|r| r.description.as_deref())
            .or_else(|| self.manifest.as_ref().and_then(|m| m.description.as_deref()))
            .filter(|s| !s.trim().is_empty())
    }

    pub fn dependency_names(&self) -> Vec<String> {
        self.manifest.as_ref().map(Manifest::dependency_names).unwrap_or_default()
    }

    /// Manifest repository, then the `origin` remote.
    pub fn repository(&self) -> Option<&str> {
        self.manifest
            .as_ref()
            .and_then(|m| m.repository.as_deref())
            .or(self.remote_url.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    pub fn readme_features(&self) -> &[String] {
        self.readme.as_ref().map(|r| r.features.as_slice()).unwrap_or(&[])
    }

    pub fn readme_technologies(&self) -> &[String] {
        self.readme.as_ref().map(|r| r.technologies.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_prefers_manifest_then_readme_title() {
        let mut meta = ProjectMetadata {
            manifest: Some(Manifest { name: Some("pkg".to_string()), ..Default::default() }),
            readme: Some(ReadmeInfo {
                title: Some("Pretty Name".to_string()),
                ..Default::default()
            }),
            remote_url: None,
        };
        assert_eq!(meta.name(), Some("pkg"));
        meta.manifest = None;
        assert_eq!(meta.name(), Some("Pretty Name"));
    }

    #[test]
    fn description_prefers_readme() {
        let meta = ProjectMetadata {
            manifest: Some(Manifest {
                description: Some("from manifest".to_string()),
                ..Default::default()
            }),
            readme: Some(ReadmeInfo {
                description: Some("from readme".to_string()),
                ..Default::default()
            }),
            remote_url: None,
        };
        assert_eq!(meta.description(), Some("from readme"));
        assert_eq!(ProjectMetadata::default().description(), None);
    }

    #[test]
    fn repository_falls_back_to_remote() {
        let mut meta = ProjectMetadata {
            remote_url: Some("https://github.com/ada/engine".to_string()),
            ..Default::default()
        };
        assert_eq!(meta.repository(), Some("https://github.com/ada/engine"));

        meta.manifest = Some(Manifest {
            repository: Some("https://github.com/ada/engine-pkg".to_string()),
            ..Default::default()
        });
        assert_eq!(meta.repository(), Some("https://github.com/ada/engine-pkg"));
    }
}
