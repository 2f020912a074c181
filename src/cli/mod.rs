//! Command-line interface for repo-resume
//!
//! Provides `generate`, `info`, `endorse`, `endorsements`, and `completions`.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod endorse;
mod generate;
mod info;
mod utils;

/// Turn a git repository into a structured, styled resume
#[derive(Parser)]
#[command(name = "repo-resume")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a resume from a repository's history and metadata
    Generate(Box<generate::GenerateArgs>),

    /// Show what would feed a resume, without generating one
    Info(info::InfoArgs),

    /// Record that someone endorses a skill
    Endorse(endorse::EndorseArgs),

    /// List recorded endorsements
    Endorsements(endorse::EndorsementsArgs),

    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG in the environment always takes precedence; --verbose falls back to DEBUG.
    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Generate(args) => generate::run(*args),
        Commands::Info(args) => info::run(args),
        Commands::Endorse(args) => endorse::run_endorse(args),
        Commands::Endorsements(args) => endorse::run_list(args),
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "repo-resume", &mut std::io::stdout());
            Ok(())
        }
    }
}
