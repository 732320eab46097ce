//! SipHash partitioner implementation.

use crate::partitioner::traits::Partitioner;
use crate::token::wide::Token64;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Keyed SipHash-1-3 partitioner.
///
/// Rings that must agree on placement have to share the same seed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipPartitioner {
    seed: u64,
}

impl SipPartitioner {
    /// Creates a partitioner keyed with `seed`.
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Partitioner for SipPartitioner {
    type TokenType = Token64;

    fn partition(&self, key: &str) -> Self::TokenType {
        let mut hasher = SipHasher13::new_with_keys(self.seed, 0);
        hasher.write(key.as_bytes());
        Token64(hasher.finish())
    }

    fn name(&self) -> &'static str {
        "SipPartitioner"
    }
}
