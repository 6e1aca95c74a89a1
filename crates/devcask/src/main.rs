//! Devcask CLI entry point.

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use devcask::cli::Cli;

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.debug {
        "devcask=debug"
    } else {
        "devcask=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .init();

    // Execute command
    cli.execute()
}
