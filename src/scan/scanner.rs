//! Gitignore-aware project walk that hands each accepted file to a visitor.

use anyhow::Result;
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::rules::ScanRules;
use crate::infer::language_for_path;
use crate::utils::relative_display;

/// A file accepted by the scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Forward-slashed path relative to the scan root.
    pub relative_path: String,
    pub size_bytes: u64,
    pub language: Option<&'static str>,
}

/// Counters for one walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Files the walker yielded after gitignore filtering.
    pub files_seen: usize,
    pub files_included: usize,
    /// Skip counts keyed by rule label.
    pub skipped: BTreeMap<&'static str, usize>,
}

impl ScanStats {
    pub fn files_skipped(&self) -> usize {
        self.skipped.values().sum()
    }
}

/// Walks a project tree, applying [`ScanRules`] to directories and files.
pub struct ProjectScanner {
    root: PathBuf,
    rules: ScanRules,
    respect_gitignore: bool,
    follow_symlinks: bool,
}

impl ProjectScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            rules: ScanRules::default(),
            respect_gitignore: true,
            follow_symlinks: false,
        }
    }

    /// Replace the exclusion rules.
    pub fn rules(mut self, rules: ScanRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn respect_gitignore(mut self, respect: bool) -> Self {
        self.respect_gitignore = respect;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and call `visit` for every accepted file, in walk order.
    pub fn visit<F>(&self, mut visit: F) -> Result<ScanStats>
    where
        F: FnMut(&ScannedFile),
    {
        let mut stats = ScanStats::default();

        let dir_rules = self.rules.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .git_ignore(self.respect_gitignore)
            .git_global(self.respect_gitignore)
            .git_exclude(self.respect_gitignore)
            .require_git(false)
            .follow_links(self.follow_symlinks)
            .hidden(false)
            .parents(true)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                // Depth 0 is the root itself, which may legitimately be a dot-directory.
                if !is_dir || entry.depth() == 0 {
                    return true;
                }
                entry.file_name().to_str().map_or(true, |name| !dir_rules.excludes_dir(name))
            });

        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            stats.files_seen += 1;

            let path = entry.path();
            let relative_path = relative_display(&self.root, path);
            let size_bytes = entry.metadata().map(|m| m.len()).unwrap_or(0);

            if let Some(rule) = self.rules.file_exclusion(path, &relative_path, size_bytes) {
                *stats.skipped.entry(rule.label()).or_insert(0) += 1;
                continue;
            }

            let file = ScannedFile {
                language: language_for_path(&relative_path),
                path: path.to_path_buf(),
                relative_path,
                size_bytes,
            };
            stats.files_included += 1;
            visit(&file);
        }

        debug!(
            "Scanned {}: {} seen, {} included, {} skipped",
            self.root.display(),
            stats.files_seen,
            stats.files_included,
            stats.files_skipped()
        );
        Ok(stats)
    }

    /// Collect accepted files sorted by relative path.
    pub fn scan(&self) -> Result<(Vec<ScannedFile>, ScanStats)> {
        let mut files = Vec::new();
        let stats = self.visit(|file| files.push(file.clone()))?;
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        Ok((files, stats))
    }
}
