//! One resume run, from repository discovery to the written document.
//!
//! ```text
//! Idle -> CollectingSignals -> AssistedSynthesis | FallbackSynthesis -> Merging -> Rendered
//!                 \                                                        /
//!                  +------------------------> Aborted <-------------------+
//! ```
//!
//! Every environment check (repository, commits, writable output) and every
//! interactive prompt happens while collecting signals, so an aborted run
//! never writes anything. The only writes are the output file and, after it,
//! the remembered import handle.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::domain::{
    CommitRecord, Config, PersonalInfo, ProjectMetadata, RepositorySnapshot, ResumeDocument,
};
use crate::error::PipelineError;
use crate::history::{extract_history, GitSource};
use crate::project::{normalize_repository_url, read_project_metadata};
use crate::render::{check_output_writable, default_output_path, render_document, write_output};
use crate::scan::{census_project, FileCensus};
use crate::store::{EndorsementTable, Preferences};
use crate::synth::{ContentSynthesizer, SectionSources, SynthesisContext, SynthesisRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Idle,
    CollectingSignals,
    AssistedSynthesis,
    FallbackSynthesis,
    Merging,
    Rendered,
    Aborted,
}

/// Questions a run may need answered. Returning `Err(PipelineError::Cancelled)`
/// aborts the run.
pub trait Interaction {
    /// Name to use when none was configured or found in git config.
    fn ask_name(&self) -> Result<Option<String>, PipelineError>;

    /// Whether an existing output file may be replaced.
    fn confirm_overwrite(&self, path: &Path) -> Result<bool, PipelineError>;
}

/// Never asks: names stay empty and existing output is replaced.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPrompt;

impl Interaction for NoPrompt {
    fn ask_name(&self) -> Result<Option<String>, PipelineError> {
        Ok(None)
    }

    fn confirm_overwrite(&self, _path: &Path) -> Result<bool, PipelineError> {
        Ok(true)
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub root: PathBuf,
    pub output: PathBuf,
    pub document: ResumeDocument,
    pub snapshot: RepositorySnapshot,
    pub sources: SectionSources,
    pub imported_handle: Option<String>,
}

/// Signals gathered from the repository before synthesis.
#[derive(Debug, Clone)]
pub struct CollectedSignals {
    pub root: PathBuf,
    pub commits: Vec<CommitRecord>,
    pub snapshot: RepositorySnapshot,
    pub metadata: ProjectMetadata,
    pub census: Option<FileCensus>,
    pub git_name: Option<String>,
    pub git_email: Option<String>,
}

/// Read everything a run (or `info`) needs from the repository at `path`.
pub fn collect_signals(path: &Path, max_commits: usize) -> Result<CollectedSignals, PipelineError> {
    let git = GitSource::discover(path)
        .ok_or_else(|| PipelineError::NoRepository(path.to_path_buf()))?;
    let root = git.workdir();
    debug!("Repository root: {}", root.display());

    let commits = extract_history(&git, max_commits);
    if commits.is_empty() {
        return Err(PipelineError::NoCommits(root));
    }
    let snapshot = RepositorySnapshot::from_commits(&commits);

    let mut metadata = read_project_metadata(&root);
    metadata.remote_url = git.origin_url().map(|url| normalize_repository_url(&url));
    let census = match census_project(&root) {
        Ok(census) => Some(census),
        Err(e) => {
            warn!("File census failed: {}", e);
            None
        }
    };
    let identity = git.identity();

    info!(
        "Collected {} commits by {} author(s) across {} language(s)",
        snapshot.total_commits,
        snapshot.authors.len(),
        snapshot.languages.len()
    );

    Ok(CollectedSignals {
        root,
        commits,
        snapshot,
        metadata,
        census,
        git_name: identity.name,
        git_email: identity.email,
    })
}

fn first_non_empty(values: [Option<&str>; 2]) -> String {
    values
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Drives a single run through [`RunStage`]s.
pub struct Pipeline<'a> {
    synthesizer: ContentSynthesizer<'a>,
    interaction: &'a dyn Interaction,
    stage: RunStage,
}

impl<'a> Pipeline<'a> {
    pub fn new(synthesizer: ContentSynthesizer<'a>, interaction: &'a dyn Interaction) -> Self {
        Self { synthesizer, interaction, stage: RunStage::Idle }
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    fn enter(&mut self, stage: RunStage) {
        debug!("Run stage {:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }

    /// Run against the repository containing `path`.
    pub async fn run(&mut self, path: &Path, config: &Config) -> Result<RunReport, PipelineError> {
        match self.try_run(path, config).await {
            Ok(report) => {
                self.enter(RunStage::Rendered);
                Ok(report)
            }
            Err(e) => {
                self.enter(RunStage::Aborted);
                Err(e)
            }
        }
    }

    async fn try_run(&mut self, path: &Path, config: &Config) -> Result<RunReport, PipelineError> {
        self.enter(RunStage::CollectingSignals);
        let signals = collect_signals(path, config.max_commits)?;
        let root = signals.root.clone();

        let output =
            config.output.clone().unwrap_or_else(|| default_output_path(&root, config.format));
        check_output_writable(&output)?;
        if output.is_file() && !self.interaction.confirm_overwrite(&output)? {
            return Err(PipelineError::Cancelled);
        }

        let mut personal = PersonalInfo {
            name: first_non_empty([config.name.as_deref(), signals.git_name.as_deref()]),
            title: config.title.clone().unwrap_or_default(),
            email: first_non_empty([config.email.as_deref(), signals.git_email.as_deref()]),
            link: config.link.clone().unwrap_or_default(),
        };
        if personal.name.is_empty() {
            if let Some(name) = self.interaction.ask_name()? {
                personal.name = name.trim().to_string();
            }
        }

        let endorsements = EndorsementTable::load(&root).unwrap_or_else(|e| {
            warn!("Ignoring endorsements: {}", e);
            EndorsementTable::default()
        });
        let mut preferences = Preferences::load(&root).unwrap_or_else(|e| {
            warn!("Ignoring saved preferences: {}", e);
            Preferences::default()
        });
        let import_handle =
            config.github_user.clone().or_else(|| preferences.last_github_handle.clone());

        let fallback_name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());
        let context = SynthesisContext::build(
            &fallback_name,
            &signals.snapshot,
            &signals.commits,
            &signals.metadata,
            signals.census.as_ref(),
            config.commit_sample,
        );

        self.enter(if self.synthesizer.is_assisted() {
            RunStage::AssistedSynthesis
        } else {
            RunStage::FallbackSynthesis
        });
        let outcome = self
            .synthesizer
            .synthesize(SynthesisRequest {
                context,
                personal,
                user_skills: config.skills.clone(),
                import_handle,
                endorsements,
            })
            .await;

        self.enter(RunStage::Merging);
        let content = render_document(&outcome.document, config.format, config.style)?;
        write_output(&output, &content)?;
        info!("Wrote {} resume to {}", config.style, output.display());

        if let Some(handle) = &outcome.imported_handle {
            if preferences.remember_handle(handle) {
                if let Err(e) = preferences.save(&root) {
                    warn!("Could not remember import handle: {}", e);
                }
            }
        }

        Ok(RunReport {
            root,
            output,
            document: outcome.document,
            snapshot: signals.snapshot,
            sources: outcome.sources,
            imported_handle: outcome.imported_handle,
        })
    }
}
