//! The shared context every synthesis prompt (and every fallback) is built from.

use std::fmt::Write as _;

use crate::domain::{CommitRecord, ProjectMetadata, RepositorySnapshot};
use crate::infer::{detect_databases, detect_frameworks, detect_tools};
use crate::scan::FileCensus;
use crate::synth::merge::union_lists;

const MAX_DEPENDENCIES_LISTED: usize = 40;
const MAX_CENSUS_LANGUAGES: usize = 8;

/// Signals collected for one run, before any synthesis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisContext {
    pub project_name: String,
    pub description: Option<String>,
    pub repository: Option<String>,
    pub keywords: Vec<String>,
    pub dependencies: Vec<String>,
    pub readme_sections: Vec<String>,
    pub readme_features: Vec<String>,
    pub readme_technologies: Vec<String>,
    /// Languages inferred from files touched in the commit window.
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub tools: Vec<String>,
    pub commit_count: usize,
    pub author_count: usize,
    pub duration: String,
    /// Bounded sample of the newest commit subjects.
    pub recent_subjects: Vec<String>,
    /// `Rust (12), TypeScript (4)` style census line, when a scan ran.
    pub file_census: Option<String>,
}

impl SynthesisContext {
    /// Collect every deterministic signal for the run.
    ///
    /// `fallback_name` is used when neither manifest nor README names the
    /// project (typically the directory name).
    pub fn build(
        fallback_name: &str,
        snapshot: &RepositorySnapshot,
        commits: &[CommitRecord],
        metadata: &ProjectMetadata,
        census: Option<&FileCensus>,
        commit_sample: usize,
    ) -> Self {
        let manifest = metadata.manifest.as_ref();
        let dependencies = metadata.dependency_names();
        let keywords = manifest.map(|m| m.keywords.clone()).unwrap_or_default();
        let description = metadata.description().map(str::to_string);

        // Free text the keyword tables run over, alongside dependency names.
        let blob = format!("{}\n{}", description.as_deref().unwrap_or(""), keywords.join(" "));

        let recent_subjects = commits
            .iter()
            .map(|c| c.subject.trim())
            .filter(|s| !s.is_empty())
            .take(commit_sample)
            .map(str::to_string)
            .collect();

        Self {
            project_name: metadata.name().unwrap_or(fallback_name).to_string(),
            repository: metadata.repository().map(str::to_string),
            readme_sections: metadata
                .readme
                .as_ref()
                .map(|r| r.sections.clone())
                .unwrap_or_default(),
            readme_features: metadata.readme_features().to_vec(),
            readme_technologies: metadata.readme_technologies().to_vec(),
            languages: snapshot.languages.clone(),
            frameworks: detect_frameworks(&blob, &dependencies),
            databases: detect_databases(&blob, &dependencies),
            tools: detect_tools(&blob, &dependencies),
            commit_count: snapshot.total_commits,
            author_count: snapshot.authors.len(),
            duration: snapshot.duration_label(),
            file_census: census.filter(|c| !c.is_empty()).map(|c| c.describe(MAX_CENSUS_LANGUAGES)),
            description,
            keywords,
            dependencies,
            recent_subjects,
        }
    }

    /// Languages, frameworks, datastores, tools, and README technologies, deduplicated.
    pub fn technologies(&self) -> Vec<String> {
        union_lists(&[
            &self.languages,
            &self.frameworks,
            &self.databases,
            &self.tools,
            &self.readme_technologies,
        ])
    }

    /// Plain-text rendering used verbatim as the prompt context.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Project: {}", self.project_name);
        if let Some(description) = &self.description {
            let _ = writeln!(out, "Description: {description}");
        }
        if let Some(repository) = &self.repository {
            let _ = writeln!(out, "Repository: {repository}");
        }
        write_list(&mut out, "Keywords", &self.keywords);
        if !self.dependencies.is_empty() {
            let shown: Vec<&str> = self
                .dependencies
                .iter()
                .take(MAX_DEPENDENCIES_LISTED)
                .map(String::as_str)
                .collect();
            let more = self.dependencies.len().saturating_sub(shown.len());
            let suffix = if more > 0 { format!(" (+{more} more)") } else { String::new() };
            let _ = writeln!(out, "Dependencies: {}{}", shown.join(", "), suffix);
        }
        write_list(&mut out, "README sections", &self.readme_sections);
        write_list(&mut out, "README features", &self.readme_features);
        write_list(&mut out, "Technologies", &self.technologies());
        if let Some(census) = &self.file_census {
            let _ = writeln!(out, "Source files by language: {census}");
        }
        let _ = writeln!(
            out,
            "Commits analyzed: {} by {} author(s)",
            self.commit_count, self.author_count
        );
        let _ = writeln!(out, "Active period: {}", self.duration);
        if !self.recent_subjects.is_empty() {
            let _ = writeln!(out, "Recent commit subjects:");
            for subject in &self.recent_subjects {
                let _ = writeln!(out, "- {subject}");
            }
        }
        out
    }
}

fn write_list(out: &mut String, label: &str, items: &[String]) {
    if !items.is_empty() {
        let _ = writeln!(out, "{label}: {}", items.join(", "));
    }
}
