//! Core data models for Metaplanet Price CLI
//!
//! This module contains the quote target, the cached price snapshot and the
//! JSON result printed on stdout.

pub mod scraper;

pub use scraper::{extract_price, FetchError, PriceFetcher};

use chrono::{Local, Utc};
use serde::{Deserialize, Serialize};

/// Yahoo Finance Japan quote page for Metaplanet
pub const DEFAULT_QUOTE_URL: &str = "https://finance.yahoo.co.jp/quote/3350.T";

/// Message reported when no price could be produced
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch price";

/// The stock being quoted
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteTarget {
    /// Exchange symbol, e.g. "3350.T"
    pub symbol: String,
    /// Quote currency
    pub currency: String,
    /// Page scraped for the price
    pub url: String,
}

impl Default for QuoteTarget {
    fn default() -> Self {
        Self::metaplanet()
    }
}

impl QuoteTarget {
    /// Metaplanet on the Tokyo Stock Exchange
    pub fn metaplanet() -> Self {
        Self {
            symbol: "3350.T".to_string(),
            currency: "JPY".to_string(),
            url: DEFAULT_QUOTE_URL.to_string(),
        }
    }

    /// Replaces the page URL, keeping the symbol
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Numeric ticker code in front of the exchange suffix ("3350.T" -> 3350.0)
    ///
    /// Quote pages repeat the ticker code all over, so a scraped number equal
    /// to it is never taken as the price.
    pub fn ticker_code(&self) -> Option<f64> {
        self.symbol.split('.').next()?.parse().ok()
    }
}

/// A cached price with its capture time
///
/// Stored on disk as `{"price": 487.0, "timestamp": 1721052000.5, "updated": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    /// Share price in the quote currency
    pub price: f64,
    /// Capture time in (fractional) seconds since the Unix epoch
    #[serde(default)]
    pub timestamp: f64,
    /// Capture time as local ISO-8601, for humans
    #[serde(default)]
    pub updated: String,
}

impl PriceSnapshot {
    /// Creates a snapshot stamped with the current time
    pub fn now(price: f64) -> Self {
        Self {
            price,
            timestamp: epoch_seconds(),
            updated: Local::now()
                .naive_local()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
        }
    }

    /// Seconds elapsed between capture and `now`
    pub fn age_at(&self, now: f64) -> f64 {
        now - self.timestamp
    }
}

/// Current time in fractional seconds since the Unix epoch
pub fn epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

/// The single JSON line printed by the CLI
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QuoteOutput {
    /// A price was found, either cached or freshly scraped
    Price {
        price: f64,
        currency: String,
        symbol: String,
    },
    /// Every source was exhausted
    Failure { error: String, symbol: String },
}

impl QuoteOutput {
    /// Builds the output for an optional price
    pub fn from_price(target: &QuoteTarget, price: Option<f64>) -> Self {
        match price {
            Some(price) => QuoteOutput::Price {
                price,
                currency: target.currency.clone(),
                symbol: target.symbol.clone(),
            },
            None => QuoteOutput::Failure {
                error: FETCH_FAILED_MESSAGE.to_string(),
                symbol: target.symbol.clone(),
            },
        }
    }

    /// Serializes to one compact JSON line
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
