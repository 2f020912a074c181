//! Exclusion rules for the project scanner.
//!
//! Rules are plain data so callers can add, drop, or replace them without
//! touching the walk itself.

use anyhow::Result;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::utils::{is_binary_file, DEFAULT_SAMPLE_SIZE};

const NOISE_DIRS: &[&str] = &[
    "node_modules",
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    "target",
    "dist",
    "build",
    "coverage",
    ".next",
];

const VENDOR_SEGMENTS: &[&str] = &[
    "vendor",
    "vendors",
    "third_party",
    "third-party",
    "thirdparty",
    "external",
    "extern",
    "node_modules",
];

const LOCK_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "poetry.lock",
    "pipfile.lock",
    "cargo.lock",
    "gemfile.lock",
    "composer.lock",
    "go.sum",
];

const MINIFIED_MARKERS: &[&str] = &[".min.", ".bundle.", ".packed."];

/// One exclusion rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanRule {
    /// Never descend into a directory with exactly this name.
    SkipDir(String),
    /// Skip dot-directories, except the listed names.
    HiddenDirs { allow: Vec<String> },
    /// Skip files whose relative path matches the glob.
    Glob(String),
    /// Dependency lock files.
    LockFiles,
    /// Files under a third-party directory segment.
    Vendored,
    /// Minified bundles, by name marker or an overlong first line.
    Minified { max_line_length: usize },
    /// Files that sniff as binary.
    Binary,
    /// Files larger than this many bytes.
    LargerThan(u64),
}

impl ScanRule {
    /// Short label used in skip statistics.
    pub fn label(&self) -> &'static str {
        match self {
            ScanRule::SkipDir(_) | ScanRule::HiddenDirs { .. } => "directory",
            ScanRule::Glob(_) => "glob",
            ScanRule::LockFiles => "lock",
            ScanRule::Vendored => "vendored",
            ScanRule::Minified { .. } => "minified",
            ScanRule::Binary => "binary",
            ScanRule::LargerThan(_) => "size",
        }
    }

    /// Whether this rule prunes the directory named `name`.
    pub fn excludes_dir(&self, name: &str) -> bool {
        match self {
            ScanRule::SkipDir(dir) => dir == name,
            ScanRule::HiddenDirs { allow } => {
                name.starts_with('.') && !allow.iter().any(|a| a == name)
            }
            _ => false,
        }
    }
}

/// An ordered rule list plus the compiled glob matcher for its `Glob` rules.
#[derive(Debug, Clone)]
pub struct ScanRules {
    rules: Vec<ScanRule>,
    globs: GlobSet,
}

impl ScanRules {
    pub fn new(rules: Vec<ScanRule>) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for rule in &rules {
            if let ScanRule::Glob(pattern) = rule {
                builder.add(Glob::new(pattern)?);
            }
        }
        Ok(Self { rules, globs: builder.build()? })
    }

    /// No rules at all: every file the walker yields is visited.
    pub fn none() -> Self {
        Self { rules: Vec::new(), globs: GlobSet::empty() }
    }

    pub fn rules(&self) -> &[ScanRule] {
        &self.rules
    }

    /// Append a rule, recompiling globs when needed.
    pub fn with(mut self, rule: ScanRule) -> Result<Self> {
        self.rules.push(rule);
        Self::new(self.rules)
    }

    pub fn excludes_dir(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.excludes_dir(name))
    }

    /// First file-level rule that excludes the file, if any.
    pub fn file_exclusion(&self, path: &Path, rel_path: &str, size: u64) -> Option<&ScanRule> {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("").to_lowercase();
        self.rules.iter().find(|rule| match rule {
            ScanRule::SkipDir(_) | ScanRule::HiddenDirs { .. } => false,
            ScanRule::Glob(_) => self.globs.is_match(rel_path),
            ScanRule::LockFiles => LOCK_FILES.contains(&name.as_str()),
            ScanRule::Vendored => rel_path
                .split('/')
                .rev()
                .skip(1)
                .any(|segment| VENDOR_SEGMENTS.contains(&segment.to_lowercase().as_str())),
            ScanRule::Minified { max_line_length } => {
                is_likely_minified(path, &name, *max_line_length)
            }
            ScanRule::Binary => is_binary_file(path, DEFAULT_SAMPLE_SIZE),
            ScanRule::LargerThan(limit) => size > *limit,
        })
    }
}

impl Default for ScanRules {
    /// Noise directories, hidden directories except `.github`, lock files,
    /// vendored code, minified bundles, binaries, and files over 1 MiB.
    fn default() -> Self {
        let mut rules: Vec<ScanRule> =
            NOISE_DIRS.iter().map(|dir| ScanRule::SkipDir(dir.to_string())).collect();
        rules.extend([
            ScanRule::HiddenDirs { allow: vec![".github".to_string()] },
            ScanRule::LockFiles,
            ScanRule::Vendored,
            ScanRule::Minified { max_line_length: 5000 },
            ScanRule::Binary,
            ScanRule::LargerThan(1_048_576),
        ]);
        Self { rules, globs: GlobSet::empty() }
    }
}

fn is_likely_minified(path: &Path, lower_name: &str, max_line_length: usize) -> bool {
    if MINIFIED_MARKERS.iter().any(|marker| lower_name.contains(marker)) {
        return true;
    }
    let Ok(mut file) = File::open(path) else {
        return false;
    };
    let mut buffer = vec![0u8; max_line_length + 1];
    let Ok(n) = file.read(&mut buffer) else {
        return false;
    };
    match buffer[..n].iter().position(|&b| b == b'\n') {
        Some(newline) => newline > max_line_length,
        None => n > max_line_length,
    }
}
