//! Manifest reading for `package.json` and `Cargo.toml`.
//!
//! A malformed manifest is logged and treated as absent; it never fails the run.

use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::domain::Manifest;
use crate::utils::read_file_safe;

/// Manifest candidates in priority order.
pub const MANIFEST_CANDIDATES: &[&str] = &["package.json", "Cargo.toml"];

/// Read the first manifest that exists under `root`.
pub fn read_manifest(root: &Path) -> Option<Manifest> {
    let (file_name, path) = MANIFEST_CANDIDATES
        .iter()
        .map(|name| (*name, root.join(name)))
        .find(|(_, path)| path.is_file())?;

    let content = match read_file_safe(&path, None, None) {
        Ok((content, _)) => content,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    let parsed = match file_name {
        "package.json" => parse_package_json(&content).map_err(|e| e.to_string()),
        _ => parse_cargo_toml(&content).map_err(|e| e.to_string()),
    };

    match parsed {
        Ok(manifest) => {
            debug!("Parsed manifest {}", path.display());
            Some(manifest)
        }
        Err(e) => {
            warn!("Ignoring malformed manifest {}: {}", path.display(), e);
            None
        }
    }
}

fn string_map(value: Option<&Value>) -> BTreeMap<String, String> {
    let Some(Value::Object(map)) = value else {
        return BTreeMap::new();
    };
    map.iter()
        .map(|(k, v)| {
            let spec = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), spec)
        })
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string)
}

/// Turn `git+https://…/x.git`, `github:owner/repo`, or `owner/repo` shorthands
/// into a browsable URL.
pub fn normalize_repository_url(raw: &str) -> String {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix("git+").unwrap_or(trimmed);
    let stripped = stripped.strip_suffix(".git").unwrap_or(stripped);

    if let Some(rest) = stripped.strip_prefix("git@github.com:") {
        return format!("https://github.com/{rest}");
    }
    if let Some(rest) = stripped.strip_prefix("github:") {
        return format!("https://github.com/{rest}");
    }
    let is_shorthand = !stripped.contains(':')
        && stripped.split('/').count() == 2
        && stripped.split('/').all(|part| !part.is_empty());
    if is_shorthand {
        return format!("https://github.com/{stripped}");
    }
    stripped.to_string()
}

/// Parse a `package.json` document.
pub fn parse_package_json(content: &str) -> Result<Manifest, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Object(_) = &value else {
        return Err(serde::de::Error::custom("package.json must be a JSON object"));
    };

    let author = match value.get("author") {
        Some(Value::String(s)) => non_empty(Some(s.as_str())),
        Some(Value::Object(obj)) => non_empty(obj.get("name").and_then(Value::as_str)),
        _ => None,
    };

    let repository = match value.get("repository") {
        Some(Value::String(s)) => non_empty(Some(s.as_str())),
        Some(Value::Object(obj)) => non_empty(obj.get("url").and_then(Value::as_str)),
        _ => None,
    }
    .map(|url| normalize_repository_url(&url));

    let keywords = value
        .get("keywords")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    Ok(Manifest {
        name: non_empty(value.get("name").and_then(Value::as_str)),
        description: non_empty(value.get("description").and_then(Value::as_str)),
        dependencies: string_map(value.get("dependencies")),
        dev_dependencies: string_map(value.get("devDependencies")),
        scripts: string_map(value.get("scripts")),
        keywords,
        author,
        license: non_empty(value.get("license").and_then(Value::as_str)),
        repository,
    })
}

#[derive(Debug, Deserialize)]
struct CargoManifest {
    #[serde(default)]
    package: Option<CargoPackage>,
    #[serde(default)]
    dependencies: BTreeMap<String, toml::Value>,
    #[serde(default, rename = "dev-dependencies")]
    dev_dependencies: BTreeMap<String, toml::Value>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    keywords: Vec<String>,
    #[serde(default)]
    authors: Vec<String>,
    license: Option<String>,
    repository: Option<String>,
}

fn cargo_dependency_specs(deps: BTreeMap<String, toml::Value>) -> BTreeMap<String, String> {
    deps.into_iter()
        .map(|(name, spec)| {
            let version = match &spec {
                toml::Value::String(v) => v.clone(),
                toml::Value::Table(table) => table
                    .get("version")
                    .and_then(toml::Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| "*".to_string()),
                other => other.to_string(),
            };
            (name, version)
        })
        .collect()
}

/// Parse a `Cargo.toml` into the same normalized manifest record.
pub fn parse_cargo_toml(content: &str) -> Result<Manifest, toml::de::Error> {
    let cargo: CargoManifest = toml::from_str(content)?;
    let package = cargo.package;

    Ok(Manifest {
        name: package.as_ref().and_then(|p| non_empty(p.name.as_deref())),
        description: package.as_ref().and_then(|p| non_empty(p.description.as_deref())),
        dependencies: cargo_dependency_specs(cargo.dependencies),
        dev_dependencies: cargo_dependency_specs(cargo.dev_dependencies),
        scripts: BTreeMap::new(),
        keywords: package.as_ref().map(|p| p.keywords.clone()).unwrap_or_default(),
        author: package.as_ref().and_then(|p| p.authors.first().cloned()),
        license: package.as_ref().and_then(|p| non_empty(p.license.as_deref())),
        repository: package
            .as_ref()
            .and_then(|p| non_empty(p.repository.as_deref()))
            .map(|url| normalize_repository_url(&url)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn package_json_fields_are_normalized() {
        let manifest = parse_package_json(
            r#"{
                "name": "my-app",
                "description": "A tool for X",
                "dependencies": {"react": "^18.0.0", "pg": "^8.0.0"},
                "devDependencies": {"jest": "^29.0.0"},
                "scripts": {"test": "jest"},
                "keywords": ["cli", "resume"],
                "author": {"name": "Ada", "email": "ada@example.com"},
                "license": "MIT",
                "repository": {"type": "git", "url": "git+https://github.com/ada/my-app.git"}
            }"#,
        )
        .expect("parse");

        assert_eq!(manifest.name.as_deref(), Some("my-app"));
        assert_eq!(manifest.dependencies.get("react").map(String::as_str), Some("^18.0.0"));
        assert_eq!(manifest.dependency_names(), vec!["pg", "react", "jest"]);
        assert_eq!(manifest.author.as_deref(), Some("Ada"));
        assert_eq!(manifest.repository.as_deref(), Some("https://github.com/ada/my-app"));
        assert_eq!(manifest.keywords, vec!["cli", "resume"]);
    }

    #[test]
    fn repository_shorthands_expand() {
        assert_eq!(normalize_repository_url("ada/engine"), "https://github.com/ada/engine");
        assert_eq!(normalize_repository_url("github:ada/engine"), "https://github.com/ada/engine");
        assert_eq!(
            normalize_repository_url("git@github.com:ada/engine.git"),
            "https://github.com/ada/engine"
        );
        assert_eq!(
            normalize_repository_url("https://gitlab.com/ada/engine"),
            "https://gitlab.com/ada/engine"
        );
    }

    #[test]
    fn cargo_toml_is_read_when_no_package_json() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(
            tmp.path().join("Cargo.toml"),
            "[package]\nname = \"engine\"\ndescription = \"Fast engine\"\nauthors = [\"Ada\"]\n\n\
             [dependencies]\ntokio = { version = \"1\", features = [\"full\"] }\nserde = \"1.0\"\n",
        )
        .expect("write");

        let manifest = read_manifest(tmp.path()).expect("manifest");
        assert_eq!(manifest.name.as_deref(), Some("engine"));
        assert_eq!(manifest.dependencies.get("tokio").map(String::as_str), Some("1"));
        assert_eq!(manifest.dependencies.get("serde").map(String::as_str), Some("1.0"));
        assert_eq!(manifest.author.as_deref(), Some("Ada"));
    }

    #[test]
    fn malformed_manifest_is_treated_as_absent() {
        let tmp = TempDir::new().expect("tmp");
        fs::write(tmp.path().join("package.json"), "{ not json").expect("write");
        assert!(read_manifest(tmp.path()).is_none());

        fs::write(tmp.path().join("package.json"), "[1, 2, 3]").expect("write");
        assert!(read_manifest(tmp.path()).is_none());
    }

    #[test]
    fn missing_manifest_is_absent() {
        let tmp = TempDir::new().expect("tmp");
        assert!(read_manifest(tmp.path()).is_none());
    }
}
