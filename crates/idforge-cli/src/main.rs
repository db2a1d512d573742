mod cli;
mod commands;
mod completions;
mod config;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::CliConfig;
use idforge_core::RecordStore;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        error::handle_error(err);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if let Commands::Completions { shell } = cli.command {
        completions::generate_completions(shell);
        return Ok(());
    }

    let config = CliConfig::load();
    let store = RecordStore::new(config.store_path(cli.store.as_deref())?);
    tracing::debug!(path = %store.path().display(), "Using record file");

    match cli.command {
        Commands::Generate { name } => {
            let secret = config.secret()?;
            commands::generate::run(&store, &secret, &name, cli.format)
        }
        Commands::List => commands::list::run(&store, cli.format),
        Commands::Delete { id } => commands::delete::run(&store, &id, cli.format),
        Commands::Export => commands::export::run(&store, cli.format),
        Commands::Completions { .. } => Ok(()),
    }
}
