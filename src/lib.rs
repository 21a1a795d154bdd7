//! Pokecache - A thread-safe in-memory byte cache
//!
//! Stores raw response bodies keyed by string and reaps entries older than a
//! fixed TTL from a background task.

pub mod cache;
pub mod config;
pub mod error;
mod tasks;

pub use cache::{Cache, CacheStats};
pub use config::Config;
pub use error::{CacheError, Result};
