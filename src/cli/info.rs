//! Info command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::utils::project_root;
use crate::domain::config::{DEFAULT_COMMIT_SAMPLE, DEFAULT_MAX_COMMITS};
use crate::pipeline::collect_signals;
use crate::store::EndorsementTable;
use crate::synth::SynthesisContext;

#[derive(Args)]
pub struct InfoArgs {
    /// Repository directory (defaults to the current directory)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Number of most recent commits to analyze
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_COMMITS)]
    pub max_commits: usize,
}

fn print_list(label: &str, items: &[String]) {
    if !items.is_empty() {
        println!("{label:<14}{}", items.join(", "));
    }
}

pub fn run(args: InfoArgs) -> Result<()> {
    let root = project_root(args.path.as_deref())?;
    let signals = collect_signals(&root, args.max_commits)?;

    let fallback_name = signals.root.file_name().and_then(|n| n.to_str()).unwrap_or("project");
    let ctx = SynthesisContext::build(
        fallback_name,
        &signals.snapshot,
        &signals.commits,
        &signals.metadata,
        signals.census.as_ref(),
        DEFAULT_COMMIT_SAMPLE,
    );

    println!("Project:      {}", ctx.project_name);
    if let Some(description) = &ctx.description {
        println!("Description:  {}", description);
    }
    if let Some(repository) = &ctx.repository {
        println!("Repository:   {}", repository);
    }
    println!("Commits:      {} (window of {})", signals.snapshot.total_commits, args.max_commits);
    println!("Authors:      {}", signals.snapshot.authors.len());
    println!("Active:       {}", ctx.duration);

    print_list("Languages:", &ctx.languages);
    print_list("Frameworks:", &ctx.frameworks);
    print_list("Databases:", &ctx.databases);
    print_list("Tools:", &ctx.tools);
    print_list("README tech:", &ctx.readme_technologies);
    print_list("Features:", &ctx.readme_features);

    if let Some(census) = &signals.census {
        println!("Files:        {} ({} unclassified)", census.total_files, census.unclassified);
        for (language, count) in census.languages.iter().take(10) {
            println!("  {}: {} files", language, count);
        }
    }

    match EndorsementTable::load(&signals.root) {
        Ok(table) if !table.is_empty() => println!("Endorsements: {} skills", table.len()),
        Ok(_) => {}
        Err(e) => tracing::warn!("Ignoring endorsements: {}", e),
    }
    Ok(())
}
