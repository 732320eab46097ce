//! Core partitioner trait definitions.

use crate::token::Token;

/// A partitioner converts keys into tokens for placement on the hash ring.
///
/// This is the ring's only hashing capability: node positions and key
/// lookups both go through [`Partitioner::partition`], so swapping the
/// implementation changes how evenly positions spread but never how the
/// ring routes.
///
/// Implementations must be deterministic and stateless; the same key has to
/// produce the same token for the whole lifetime of a ring.
pub trait Partitioner: Send + Sync + 'static {
    /// The token type produced by this partitioner.
    type TokenType: Token;

    /// Converts a key into a token.
    fn partition(&self, key: &str) -> Self::TokenType;

    /// Returns the smallest token this partitioner can produce.
    fn min_token(&self) -> Self::TokenType {
        Self::TokenType::min_value()
    }

    /// Returns the largest token this partitioner can produce.
    fn max_token(&self) -> Self::TokenType {
        Self::TokenType::max_value()
    }

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}
