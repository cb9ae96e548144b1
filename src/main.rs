use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod error;
mod github;
mod parser;
mod prompt;
mod report;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Info is the user-facing level; --verbose raises to debug
    let filter = if cli.verbose {
        EnvFilter::new("policygate=debug")
    } else {
        EnvFilter::new("policygate=info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Check(args) => cli::check::execute(args).await,
        Commands::Prompt(args) => cli::prompt::execute(args),
    }
}
