//! Metaplanet Price CLI Library
//!
//! This module exposes the cache, CLI, data and app modules for use in
//! integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
