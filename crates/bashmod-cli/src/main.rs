//! bashmod - shell module manager CLI

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bashmod_cli::context::Context;
use bashmod_cli::{Cli, Commands, cmd};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        cmd::completions::completions(shell);
        return Ok(());
    }

    let ctx = Context::from_cli(&cli)?;

    match cli.command {
        Commands::List {
            installed,
            category,
            json,
        } => cmd::list::list(&ctx, installed, category.as_deref(), json).await,
        Commands::Search { query } => cmd::search::search(&ctx, &query).await,
        Commands::Info { id, source } => cmd::info::info(&ctx, &id, source.as_deref()).await,
        Commands::Install { modules, source } => {
            cmd::install::install(&ctx, &modules, source.as_deref()).await
        }
        Commands::Remove { modules } => cmd::remove::remove(&ctx, &modules),
        Commands::Conflicts { declared, json } => {
            cmd::conflicts::conflicts(&ctx, declared, json).await
        }
        Commands::Status => cmd::status::status(&ctx).await,
        Commands::Sources => cmd::sources::sources(&ctx),
        Commands::Categories => cmd::categories::categories(&ctx).await,
        Commands::Completions { .. } => Ok(()),
    }
}
