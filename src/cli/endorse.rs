//! Endorsement commands

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use super::utils::project_root;
use crate::store::EndorsementTable;

#[derive(Args)]
pub struct EndorseArgs {
    /// Skill being endorsed (case-sensitive)
    pub skill: String,

    /// Who endorses it
    pub endorser: String,

    /// Repository directory (defaults to the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,
}

#[derive(Args)]
pub struct EndorsementsArgs {
    /// Repository directory (defaults to the current directory)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,
}

pub fn run_endorse(args: EndorseArgs) -> Result<()> {
    if args.skill.trim().is_empty() || args.endorser.trim().is_empty() {
        anyhow::bail!("Skill and endorser must not be empty");
    }
    let root = project_root(args.path.as_deref())?;
    let mut table = EndorsementTable::load(&root).context("Failed to load endorsements")?;

    if table.endorse(&args.skill, &args.endorser) {
        table.save(&root).context("Failed to save endorsements")?;
        println!(
            "{} {} endorsed {} ({} total)",
            style("✓").green().bold(),
            args.endorser.trim(),
            style(args.skill.trim()).bold(),
            table.endorsers(args.skill.trim()).len()
        );
    } else {
        println!("{} already endorsed {}", args.endorser.trim(), args.skill.trim());
    }
    Ok(())
}

pub fn run_list(args: EndorsementsArgs) -> Result<()> {
    let root = project_root(args.path.as_deref())?;
    let table = EndorsementTable::load(&root).context("Failed to load endorsements")?;

    if table.is_empty() {
        println!("No endorsements recorded");
        return Ok(());
    }
    for (skill, endorsers) in table.iter() {
        println!("{} ({}): {}", style(skill).bold(), endorsers.len(), endorsers.join(", "));
    }
    Ok(())
}
