//! azuriom-client - Mojang status and Azuriom account client
//!
//! Entry point for the CLI.

mod cli;

use clap::Parser;
use cli::Args;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG wins over --verbose
    let default_level = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = cli::load_config(args.config.as_deref())?;
    tracing::debug!("Using configuration: {:?}", config);

    cli::run(args.command, &config, args.config.as_deref()).await
}
