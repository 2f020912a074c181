//! repo-resume: turn a local git repository into a structured resume document

use anyhow::Result;

fn main() -> Result<()> {
    repo_resume::cli::run()
}
