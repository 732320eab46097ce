//! BLAKE3 partitioner implementation.

use crate::partitioner::traits::Partitioner;
use crate::token::wide::Token64;

/// Partitioner taking the first 8 bytes (little endian) of the key's
/// BLAKE3 digest. Slower than the others, but cryptographically strong.
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Partitioner;

impl Partitioner for Blake3Partitioner {
    type TokenType = Token64;

    fn partition(&self, key: &str) -> Self::TokenType {
        let digest = blake3::hash(key.as_bytes());
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&digest.as_bytes()[..8]);
        Token64(u64::from_le_bytes(prefix))
    }

    fn name(&self) -> &'static str {
        "Blake3Partitioner"
    }
}
