//! XXH3 partitioner implementation.

use crate::partitioner::traits::Partitioner;
use crate::token::wide::Token64;
use xxhash_rust::xxh3::xxh3_64_with_seed;

/// Seeded XXH3-64 partitioner. The fastest of the built-ins.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Partitioner {
    seed: u64,
}

impl Xxh3Partitioner {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Partitioner for Xxh3Partitioner {
    type TokenType = Token64;

    fn partition(&self, key: &str) -> Self::TokenType {
        Token64(xxh3_64_with_seed(key.as_bytes(), self.seed))
    }

    fn name(&self) -> &'static str {
        "Xxh3Partitioner"
    }
}
