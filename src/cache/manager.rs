//! Snapshot cache for the last scraped price
//!
//! Provides a `SnapshotCache` that stores a single `PriceSnapshot` as a JSON
//! file and reports it only while it is younger than the configured TTL.

use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::{epoch_seconds, PriceSnapshot};

/// File name of the snapshot inside the cache directory
const CACHE_FILE_NAME: &str = "metaplanet_price.json";

/// Default freshness window for a cached price
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when writing the snapshot
#[derive(Debug, Error)]
pub enum CacheError {
    /// Directory creation or file write failed
    #[error("Cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot could not be encoded
    #[error("Failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where the snapshot lives and how long it stays fresh
#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Path of the snapshot file
    pub path: PathBuf,
    /// Age below which a snapshot is served without refetching
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            ttl: DEFAULT_TTL,
        }
    }
}

impl CacheConfig {
    /// Creates a config for an explicit path and TTL
    pub fn new(path: impl Into<PathBuf>, ttl: Duration) -> Self {
        Self {
            path: path.into(),
            ttl,
        }
    }

    /// XDG-compliant snapshot path
    ///
    /// Uses `~/.cache/metaplanet-price/metaplanet_price.json` on Linux, or the
    /// system temp directory when no home directory can be determined.
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("", "", "metaplanet-price")
            .map(|dirs| dirs.cache_dir().join(CACHE_FILE_NAME))
            .unwrap_or_else(|| std::env::temp_dir().join(CACHE_FILE_NAME))
    }
}

/// Reads and writes the price snapshot file
///
/// There is no locking: concurrent writers race and the last one wins.
/// Stale snapshots are never deleted, only ignored by `fresh_price`.
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    config: CacheConfig,
}

impl SnapshotCache {
    /// Creates a new SnapshotCache for the given config
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Reads the snapshot regardless of age
    ///
    /// Returns `None` if the file doesn't exist or cannot be parsed.
    pub fn read(&self) -> Option<PriceSnapshot> {
        let content = fs::read_to_string(self.path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Returns the cached price if the snapshot is younger than the TTL
    pub fn fresh_price(&self) -> Option<f64> {
        self.fresh_price_at(epoch_seconds())
    }

    fn fresh_price_at(&self, now: f64) -> Option<f64> {
        let snapshot = self.read()?;
        let age = snapshot.age_at(now);
        if age < self.config.ttl.as_secs_f64() {
            debug!(price = snapshot.price, age, "cache hit");
            Some(snapshot.price)
        } else {
            debug!(age, "cached snapshot is stale");
            None
        }
    }

    /// Ensures the snapshot's parent directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        match self.path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    /// Writes a snapshot of `price` stamped with the current time
    ///
    /// # Returns
    /// * `Ok(PriceSnapshot)` - The snapshot that was written
    /// * `Err(CacheError)` - If directory creation or file writing fails
    pub fn write(&self, price: f64) -> Result<PriceSnapshot, CacheError> {
        self.ensure_dir()?;

        let snapshot = PriceSnapshot::now(price);
        let json = serde_json::to_string(&snapshot)?;
        fs::write(self.path(), json)?;

        Ok(snapshot)
    }

    /// Writes a snapshot, logging instead of returning any failure
    pub fn store(&self, price: f64) {
        if let Err(e) = self.write(price) {
            warn!(path = %self.path().display(), "Error caching price: {}", e);
        }
    }
}
