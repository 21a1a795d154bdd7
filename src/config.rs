//! Configuration Module
//!
//! Handles loading cache configuration from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Environment variable holding the TTL in milliseconds.
pub const TTL_ENV_VAR: &str = "POKECACHE_TTL_MS";

/// Default TTL in milliseconds.
pub const DEFAULT_TTL_MS: u64 = 5_000;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Entry lifetime and reaper period, in milliseconds
    pub ttl_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Missing or unparsable values fall back to the defaults.
    ///
    /// # Environment Variables
    /// - `POKECACHE_TTL_MS` - TTL in milliseconds (default: 5000)
    pub fn from_env() -> Self {
        Self {
            ttl_ms: env::var(TTL_ENV_VAR)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
        }
    }

    /// Like [`Config::from_env`], but a variable that is set and cannot be
    /// parsed is reported instead of silently replaced by the default.
    pub fn try_from_env() -> Result<Self> {
        let ttl_ms = match env::var(TTL_ENV_VAR) {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                CacheError::InvalidConfig(format!("{}={}", TTL_ENV_VAR, raw))
            })?,
            Err(_) => DEFAULT_TTL_MS,
        };

        Ok(Self { ttl_ms })
    }

    /// Returns the TTL as a Duration.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ttl_ms: DEFAULT_TTL_MS,
        }
    }
}
