//! Application state and the cache-then-fetch flow
//!
//! `App` ties the snapshot cache to the quote page scraper. Every failure on
//! the way degrades to "no price", which the caller renders as the error
//! JSON shape.

use tracing::{debug, info};

use crate::cache::SnapshotCache;
use crate::cli::StartupConfig;
use crate::data::{PriceFetcher, QuoteOutput};

/// Main application state for one run
#[derive(Debug, Clone)]
pub struct App {
    /// Snapshot cache consulted before the network
    cache: SnapshotCache,
    /// Scraper for the quote page
    fetcher: PriceFetcher,
    /// Skip the cache read when set
    refresh: bool,
}

impl App {
    /// Creates a new App from startup configuration
    pub fn new(config: StartupConfig) -> Self {
        Self {
            cache: SnapshotCache::new(config.cache),
            fetcher: PriceFetcher::new(config.target),
            refresh: config.refresh,
        }
    }

    /// Resolves the current price
    ///
    /// # Behavior
    /// - Returns a fresh cached price without touching the network
    /// - Otherwise scrapes the quote page once, caching a found price
    /// - Returns `None` if the fetch fails for any reason; there is no
    ///   fallback to a stale cache entry
    pub async fn resolve_price(&self) -> Option<f64> {
        if !self.refresh {
            if let Some(price) = self.cache.fresh_price() {
                return Some(price);
            }
        }

        match self.fetcher.fetch_price().await {
            Ok(price) => {
                info!(price, "fetched price");
                self.cache.store(price);
                Some(price)
            }
            Err(e) => {
                debug!(error = %e, "price fetch failed");
                None
            }
        }
    }

    /// Resolves the price and wraps it in the output shape
    pub async fn run(&self) -> QuoteOutput {
        let price = self.resolve_price().await;
        QuoteOutput::from_price(self.fetcher.target(), price)
    }
}
