//! Token abstraction module for consistent hashing.
//!
//! Tokens represent positions on the hash ring and must be comparable,
//! hashable, and thread-safe.

pub mod narrow;
pub mod traits;
pub mod wide;

pub use narrow::Token32;
pub use traits::Token;
pub use wide::Token64;
