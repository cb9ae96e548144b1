pub mod check;
pub mod prompt;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "policygate")]
#[command(
    author,
    version,
    about = "CI gate for AI policy review: parses reviewer verdicts and fails on critical violations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a reviewer result file, comment violations, and gate the run
    Check(CheckArgs),

    /// Render the policy prompt from a template and a git diff
    Prompt(PromptArgs),
}

#[derive(Parser, Clone)]
pub struct CheckArgs {
    /// Path to the reviewer result file
    #[arg(value_name = "RESULT")]
    pub result: PathBuf,

    /// Log comments locally instead of posting to GitHub
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Parser, Clone)]
pub struct PromptArgs {
    /// Path to the prompt template
    #[arg(long)]
    pub template: PathBuf,

    /// Path to the diff file to review
    #[arg(long)]
    pub diff: PathBuf,

    /// Where to write the rendered prompt
    #[arg(long)]
    pub output: PathBuf,
}
