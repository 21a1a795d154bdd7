//! Error types for the cache
//!
//! Only construction can fail; `add` and `get` are infallible.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// TTL must be a positive duration
    #[error("Invalid TTL: must be greater than zero")]
    InvalidTtl,

    /// The reaper needs a tokio runtime to run on
    #[error("No tokio runtime available to run the reaper task")]
    NoRuntime,

    /// An environment variable was set to something unparsable
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
