//! Polynomial string-hash partitioner.

use crate::partitioner::traits::Partitioner;
use crate::token::narrow::Token32;

/// Largest position this partitioner emits (the sign bit is masked off).
const POSITIVE_MASK: u32 = 0x7fff_ffff;

/// Default partitioner: `s[0]*31^(n-1) + ... + s[n-1]` over UTF-16 code
/// units with wrapping 32-bit arithmetic, masked to 31 bits.
///
/// This is the classic `String` hash found in JVM-based systems, so rings
/// built with it place nodes identically across processes, versions and
/// languages. The distribution is weak for keys sharing a long prefix; pick
/// one of the 64-bit partitioners when balance matters more than
/// compatibility.
#[derive(Clone, Copy, Debug, Default)]
pub struct StringHashPartitioner;

impl StringHashPartitioner {
    /// Raw 32-bit string hash before masking.
    pub fn string_hash(key: &str) -> i32 {
        key.encode_utf16()
            .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
    }
}

impl Partitioner for StringHashPartitioner {
    type TokenType = Token32;

    fn partition(&self, key: &str) -> Self::TokenType {
        Token32((Self::string_hash(key) as u32) & POSITIVE_MASK)
    }

    fn max_token(&self) -> Self::TokenType {
        Token32(POSITIVE_MASK)
    }

    fn name(&self) -> &'static str {
        "StringHashPartitioner"
    }
}
