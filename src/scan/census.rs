//! Per-language file counts for the working tree.

use anyhow::Result;
use std::collections::HashMap;
use std::path::Path;

use super::scanner::{ProjectScanner, ScannedFile};

/// Source files per language, most common first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCensus {
    /// `(language, file count)` sorted by count descending, then name.
    pub languages: Vec<(String, usize)>,
    pub total_files: usize,
    /// Accepted files with no known language.
    pub unclassified: usize,
}

impl FileCensus {
    pub fn from_files<'a, I>(files: I) -> Self
    where
        I: IntoIterator<Item = &'a ScannedFile>,
    {
        let mut census = CensusBuilder::default();
        for file in files {
            census.add(file);
        }
        census.finish()
    }

    /// Language names in census order.
    pub fn language_names(&self) -> Vec<String> {
        self.languages.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// `Rust (12), TypeScript (4)` style one-liner, capped at `limit` entries.
    pub fn describe(&self, limit: usize) -> String {
        self.languages
            .iter()
            .take(limit)
            .map(|(name, count)| format!("{name} ({count})"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Default)]
struct CensusBuilder {
    counts: HashMap<&'static str, usize>,
    total: usize,
    unclassified: usize,
}

impl CensusBuilder {
    fn add(&mut self, file: &ScannedFile) {
        self.total += 1;
        match file.language {
            Some(language) => *self.counts.entry(language).or_insert(0) += 1,
            None => self.unclassified += 1,
        }
    }

    fn finish(self) -> FileCensus {
        let mut languages: Vec<(String, usize)> =
            self.counts.into_iter().map(|(name, count)| (name.to_string(), count)).collect();
        languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        FileCensus { languages, total_files: self.total, unclassified: self.unclassified }
    }
}

/// Count files under `root` with the default scan rules.
pub fn census_project(root: &Path) -> Result<FileCensus> {
    let mut census = CensusBuilder::default();
    ProjectScanner::new(root).visit(|file| census.add(file))?;
    Ok(census.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn counts_sorted_by_frequency_then_name() {
        let tmp = TempDir::new().expect("tmp");
        fs::create_dir_all(tmp.path().join("src")).expect("mkdir");
        for name in ["a.rs", "b.rs", "c.rs"] {
            fs::write(tmp.path().join("src").join(name), "fn f() {}").expect("write");
        }
        fs::write(tmp.path().join("index.ts"), "export {}").expect("write");
        fs::write(tmp.path().join("app.py"), "pass").expect("write");
        fs::write(tmp.path().join("LICENSE"), "MIT").expect("write");

        let census = census_project(tmp.path()).expect("census");
        assert_eq!(census.total_files, 6);
        assert_eq!(census.unclassified, 1);
        assert_eq!(census.language_names(), vec!["Rust", "Python", "TypeScript"]);
        assert_eq!(census.describe(2), "Rust (3), Python (1)");
    }

    #[test]
    fn empty_tree_has_empty_census() {
        let tmp = TempDir::new().expect("tmp");
        let census = census_project(tmp.path()).expect("census");
        assert!(census.is_empty());
        assert!(census.describe(5).is_empty());
    }
}
