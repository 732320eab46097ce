//! Closure-backed partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::wide::Token64;
use std::fmt;

/// Adapts any deterministic `Fn(&str) -> u64` into a [`Partitioner`].
///
/// # Example
///
/// ```rust
/// use corelib::partitioner::{FnPartitioner, Partitioner};
/// use corelib::token::Token64;
///
/// let p = FnPartitioner::new(|key: &str| key.len() as u64);
/// assert_eq!(p.partition("abc"), Token64(3));
/// ```
#[derive(Clone)]
pub struct FnPartitioner<F> {
    hash: F,
}

impl<F> FnPartitioner<F>
where
    F: Fn(&str) -> u64 + Send + Sync + 'static,
{
    pub fn new(hash: F) -> Self {
        Self { hash }
    }
}

impl<F> Partitioner for FnPartitioner<F>
where
    F: Fn(&str) -> u64 + Send + Sync + 'static,
{
    type TokenType = Token64;

    fn partition(&self, key: &str) -> Self::TokenType {
        Token64((self.hash)(key))
    }

    fn name(&self) -> &'static str {
        "FnPartitioner"
    }
}

impl<F> fmt::Debug for FnPartitioner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPartitioner").finish_non_exhaustive()
    }
}
