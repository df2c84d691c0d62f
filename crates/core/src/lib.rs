//! Core types and shared functionality for geoprov.
//!
//! This crate provides:
//! - Snapshot data model shared by the normalizer and the route layer
//! - Freshness-aware file cache with time-based retention sweep
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod snapshot;

pub use cache::{FileCache, Lookup, SweepReport};
pub use config::AppConfig;
pub use error::Error;
pub use snapshot::{CacheKey, DatasetSnapshot};
