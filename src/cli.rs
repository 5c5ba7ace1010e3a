//! Command-line interface parsing for Metaplanet Price CLI
//!
//! This module handles parsing of CLI arguments using clap. Every flag is
//! optional; a bare invocation uses the default cache location, a five-minute
//! TTL and the Yahoo Finance Japan quote page.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::cache::{CacheConfig, DEFAULT_TTL};
use crate::data::QuoteTarget;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// A zero TTL would make every cached price stale
    #[error("Invalid TTL: '{0}'. The TTL must be at least 1 second")]
    InvalidTtl(u64),
}

/// Metaplanet Price CLI - Print the current 3350.T share price as JSON
#[derive(Parser, Debug)]
#[command(name = "metaplanet-price")]
#[command(about = "Scrape the current Metaplanet (3350.T) share price, cached for five minutes")]
#[command(version)]
pub struct Cli {
    /// Path of the price cache file
    #[arg(long, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Seconds a cached price stays fresh
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TTL.as_secs())]
    pub ttl: u64,

    /// Ignore the cached price and fetch a new one
    #[arg(long)]
    pub refresh: bool,

    /// Quote page to scrape instead of Yahoo Finance Japan
    #[arg(long, value_name = "URL")]
    pub quote_url: Option<String>,
}

/// Configuration derived from CLI arguments for a single run
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// Cache file location and freshness window
    pub cache: CacheConfig,
    /// Stock being quoted
    pub target: QuoteTarget,
    /// Whether to skip the cache read
    pub refresh: bool,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Arguments
    /// * `cli` - The parsed CLI struct
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the TTL is zero
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        if cli.ttl == 0 {
            return Err(CliError::InvalidTtl(cli.ttl));
        }

        let path = cli
            .cache_file
            .clone()
            .unwrap_or_else(CacheConfig::default_path);
        let target = match &cli.quote_url {
            Some(url) => QuoteTarget::metaplanet().with_url(url.clone()),
            None => QuoteTarget::metaplanet(),
        };

        Ok(StartupConfig {
            cache: CacheConfig::new(path, Duration::from_secs(cli.ttl)),
            target,
            refresh: cli.refresh,
        })
    }
}
