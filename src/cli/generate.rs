//! Generate command implementation

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::utils::{interactive_terminal, parse_skills_arg, project_root, spinner};
use crate::config::{resolve_config, CliOverrides};
use crate::domain::{Config, OutputFormat, Style};
use crate::error::PipelineError;
use crate::fetch::GitHubClient;
use crate::llm::AnthropicClient;
use crate::pipeline::{Interaction, NoPrompt, Pipeline, RunReport};
use crate::synth::{ContentSynthesizer, SectionSource};

#[derive(Args)]
pub struct GenerateArgs {
    /// Repository directory (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Path to config file (repo-resume.toml or .repo-resume.yml)
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Visual style
    #[arg(short, long, value_enum)]
    pub style: Option<Style>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: resume/resume.<ext> under the repository root)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Number of most recent commits to analyze
    #[arg(long, value_name = "N")]
    pub max_commits: Option<usize>,

    /// Number of recent commit subjects shown to the text generator
    #[arg(long, value_name = "N")]
    pub commit_sample: Option<usize>,

    /// Your name
    #[arg(long)]
    pub name: Option<String>,

    /// Professional title, e.g. "Backend Engineer"
    #[arg(long)]
    pub title: Option<String>,

    /// Contact email
    #[arg(long)]
    pub email: Option<String>,

    /// Profile or portfolio link
    #[arg(long)]
    pub link: Option<String>,

    /// Extra skills to include (comma-separated)
    #[arg(long, value_name = "SKILLS")]
    pub skills: Option<String>,

    /// GitHub handle to import profile data and repositories from
    #[arg(long, value_name = "HANDLE")]
    pub github: Option<String>,

    /// Skip the text generator and use deterministic templates
    #[arg(long)]
    pub no_ai: bool,

    /// Text generation model
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Never prompt; keep defaults and replace existing output
    #[arg(short, long)]
    pub yes: bool,
}

impl GenerateArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            max_commits: self.max_commits,
            commit_sample: self.commit_sample,
            style: self.style,
            format: self.format,
            output: self.output.clone(),
            name: self.name.clone(),
            title: self.title.clone(),
            email: self.email.clone(),
            link: self.link.clone(),
            skills: parse_skills_arg(self.skills.as_deref()),
            github_user: self.github.clone(),
            no_ai: if self.no_ai { Some(true) } else { None },
            model: self.model.clone(),
        }
    }
}

/// Terminal prompts; the spinner is suspended while a prompt is shown.
struct TerminalPrompt {
    spinner: ProgressBar,
}

impl Interaction for TerminalPrompt {
    fn ask_name(&self) -> Result<Option<String>, PipelineError> {
        let answer = self.spinner.suspend(|| {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt("Your name (leave empty to skip)")
                .allow_empty(true)
                .interact_text()
        });
        match answer {
            Ok(name) => Ok(Some(name.trim().to_string()).filter(|n| !n.is_empty())),
            Err(e) => {
                debug!("Name prompt aborted: {}", e);
                Err(PipelineError::Cancelled)
            }
        }
    }

    fn confirm_overwrite(&self, path: &Path) -> Result<bool, PipelineError> {
        let answer = self.spinner.suspend(|| {
            Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("{} already exists. Replace it?", path.display()))
                .default(false)
                .interact_opt()
        });
        match answer {
            Ok(Some(replace)) => Ok(replace),
            Ok(None) => Err(PipelineError::Cancelled),
            Err(e) => {
                debug!("Overwrite prompt aborted: {}", e);
                Err(PipelineError::Cancelled)
            }
        }
    }
}

fn build_generator(config: &Config) -> Option<AnthropicClient> {
    if config.no_ai {
        info!("Text generation disabled; using templates");
        return None;
    }
    let Some(api_key) = config.llm.resolve_api_key() else {
        info!("No API key in {}; using templates", config.llm.api_key_env);
        return None;
    };
    match AnthropicClient::new(api_key, &config.llm) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Could not create text generation client: {}", e);
            None
        }
    }
}

fn build_profile_source() -> Option<GitHubClient> {
    match GitHubClient::from_env() {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("Could not create GitHub client: {}", e);
            None
        }
    }
}

pub fn run(args: GenerateArgs) -> Result<()> {
    let root = project_root(args.path.as_deref())?;
    let config = resolve_config(&root, args.config.as_deref(), args.overrides())?;
    debug!("Effective config: {:?}", config);

    let generator = build_generator(&config);
    let profiles = build_profile_source();

    let mut synthesizer = ContentSynthesizer::new();
    if let Some(generator) = &generator {
        synthesizer = synthesizer.with_generator(generator);
    }
    if let Some(profiles) = &profiles {
        synthesizer = synthesizer.with_profile_source(profiles);
    }

    let progress = spinner("Generating resume...");
    let prompt = TerminalPrompt { spinner: progress.clone() };
    let interaction: &dyn Interaction =
        if !args.yes && interactive_terminal() { &prompt } else { &NoPrompt };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    let mut pipeline = Pipeline::new(synthesizer, interaction);
    let result = runtime.block_on(pipeline.run(&root, &config));
    progress.finish_and_clear();

    let report = result?;
    print_report(&report, &config);
    Ok(())
}

fn print_report(report: &RunReport, config: &Config) {
    println!(
        "{} Resume written to {}",
        style("✓").green().bold(),
        style(report.output.display()).bold()
    );
    println!("  Style:    {} ({})", config.style, config.format.extension());
    println!(
        "  Commits:  {} ({})",
        report.snapshot.total_commits,
        report.snapshot.duration_label()
    );

    let assisted = report.sources.assisted_count();
    let sections = if assisted == 0 {
        style("templates".to_string()).yellow()
    } else {
        style(format!("{assisted} of 4 sections generated")).cyan()
    };
    println!("  Content:  {}", sections);
    for (name, source) in [
        ("summary", report.sources.summary),
        ("skills", report.sources.skills),
        ("experience", report.sources.experience),
        ("projects", report.sources.projects),
    ] {
        if assisted > 0 && source == SectionSource::Fallback {
            println!("            {} {} used a template", style("!").yellow(), name);
        }
    }
    if let Some(handle) = &report.imported_handle {
        println!("  Imported: github.com/{}", handle);
    }
}
