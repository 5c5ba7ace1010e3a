//! Cache module for persisting the last scraped price to disk
//!
//! This module provides a snapshot cache that stores one price with its
//! capture time and serves it back while it is younger than a configurable
//! TTL (time-to-live). Stale or unreadable snapshots read as "no value".

mod manager;

pub use manager::{CacheConfig, CacheError, SnapshotCache, DEFAULT_TTL};
