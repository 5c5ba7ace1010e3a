//! Yahoo Finance Japan quote page scraper
//!
//! There is no public quote API for Tokyo listings, so the price is pulled
//! out of the quote page HTML with a short list of patterns tried in order.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, trace};

use super::QuoteTarget;

/// Upper bound for the whole request, body included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The quote page serves a reduced layout to unknown clients
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// How many matches of a pattern are considered
#[derive(Debug, Clone, Copy, PartialEq)]
enum Scan {
    /// Only the first match in the document
    First,
    /// Every match, in document order
    All,
}

/// Extraction patterns, highest priority first. Capture group 1 is the price.
static PRICE_PATTERNS: LazyLock<Vec<(&'static str, Scan, Regex)>> = LazyLock::new(|| {
    vec![
        (
            "json_price",
            Scan::First,
            Regex::new(r#""price":"(\d{3,4})""#).expect("Invalid regex"),
        ),
        (
            "styled_number",
            Scan::All,
            Regex::new(r#"StyledNumber__value__\w+">(\d{3,4})</span>"#).expect("Invalid regex"),
        ),
        // Same text as json_price, but rescans past a rejected first match.
        (
            "preloaded_state",
            Scan::All,
            Regex::new(r#""price":"(\d{3,4})""#).expect("Invalid regex"),
        ),
    ]
});

/// Errors that can occur when fetching the quote page
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed or timed out
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected HTTP status: {0}")]
    Status(StatusCode),

    /// No pattern produced a usable price
    #[error("No price found in quote page")]
    PriceNotFound,
}

/// Client for scraping a price from a quote page
#[derive(Debug, Clone)]
pub struct PriceFetcher {
    client: Client,
    target: QuoteTarget,
}

impl PriceFetcher {
    /// Create a new PriceFetcher for the given target
    pub fn new(target: QuoteTarget) -> Self {
        Self {
            client: Client::new(),
            target,
        }
    }

    /// The target this fetcher scrapes
    pub fn target(&self) -> &QuoteTarget {
        &self.target
    }

    /// Fetch the quote page and extract the current price
    ///
    /// # Returns
    /// * `Ok(f64)` - The scraped price
    /// * `Err(FetchError)` - If the request fails, the status is not 2xx, or
    ///   no pattern matches
    pub async fn fetch_price(&self) -> Result<f64, FetchError> {
        debug!(url = %self.target.url, "fetching quote page");

        let response = self
            .client
            .get(&self.target.url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        extract_price(&body, self.target.ticker_code()).ok_or(FetchError::PriceNotFound)
    }
}

/// Extract a price from quote page HTML
///
/// Patterns are tried in priority order. `json_price` only looks at its first
/// match; the others consider every match in document order. A number equal
/// to `ticker_code` is skipped.
pub fn extract_price(html: &str, ticker_code: Option<f64>) -> Option<f64> {
    for (name, scan, regex) in PRICE_PATTERNS.iter() {
        let limit = match scan {
            Scan::First => 1,
            Scan::All => usize::MAX,
        };
        for caps in regex.captures_iter(html).take(limit) {
            let Ok(price) = caps[1].parse::<f64>() else {
                continue;
            };
            if Some(price) == ticker_code {
                trace!(pattern = *name, "skipping ticker code");
                continue;
            }
            debug!(pattern = *name, price, "price matched");
            return Some(price);
        }
    }
    None
}
