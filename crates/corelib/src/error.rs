//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Lookups never fail: an empty ring answers with `None` or an empty list.
/// Only construction and configuration are fallible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid ring configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// Invalid node configuration
    #[error("Invalid node: {0}")]
    InvalidNode(String),
    /// Hash algorithm name not recognised
    #[error("Unknown hash algorithm: {0}")]
    UnknownHashAlgorithm(String),
}
