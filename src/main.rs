//! Metaplanet Price CLI - Print the current Metaplanet share price as JSON
//!
//! Serves a cached price when it is younger than the TTL, otherwise scrapes
//! the Yahoo Finance Japan quote page. Exactly one JSON line is written to
//! stdout; diagnostics go to stderr.

use std::io::{self, Write};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use metaplanet_price::app::App;
use metaplanet_price::cli::{Cli, StartupConfig};

/// Sends log output to stderr so stdout carries only the JSON result.
/// Verbosity follows `RUST_LOG`, defaulting to warnings.
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_logging();

    let cli = Cli::parse();
    let config = StartupConfig::from_cli(&cli)?;

    let app = App::new(config);
    let output = app.run().await;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", output.to_json_line()?)?;

    Ok(())
}
