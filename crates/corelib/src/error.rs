//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Every variant is a caller-side problem or an empty-ring precondition, so
/// none of them is worth retrying without first changing the ring.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid ring configuration (e.g. zero virtual nodes per node).
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A key or node identity the ring cannot accept.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Lookup on a ring that owns no positions.
    #[error("No available node: the ring is empty")]
    NoAvailableNode,
}
