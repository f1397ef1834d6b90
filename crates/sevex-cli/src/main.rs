//! Sevex CLI - drive an external 7-Zip binary through the sevex engine.

mod cli;
mod commands;
mod error;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sevex_core=debug")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    let formatter = output::create_formatter(cli.json, cli.quiet);

    match &cli.command {
        cli::Commands::Add(args) => commands::add::execute(&cli, args, &*formatter),
        cli::Commands::Extract(args) => commands::extract::execute(&cli, args, &*formatter),
        cli::Commands::List(args) => commands::list::execute(&cli, args, &*formatter),
        cli::Commands::Info => commands::info::execute(&cli, &*formatter),
    }
}
