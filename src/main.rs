//! CubicLauncher - desktop game launcher front-end
//!
//! Entry point for CLI and GUI modes.

mod cli;
mod config;
mod core;
mod gui;
mod util;

use clap::Parser;
use cli::Args;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    // Handle subcommands first
    if let Some(command) = args.command {
        let runtime = tokio::runtime::Runtime::new()?;
        return runtime.block_on(cli::handle_command(command));
    }

    if args.list {
        let runtime = tokio::runtime::Runtime::new()?;
        return runtime.block_on(cli::list_instances());
    }

    // GUI mode: Start the launcher UI
    tracing::info!("Starting CubicLauncher GUI");
    let config = config::load()?;
    gui::run(config)
}
