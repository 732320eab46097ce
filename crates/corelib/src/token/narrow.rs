//! 32-bit token implementation.

use crate::token::traits::Token;
use std::fmt;

/// Token for hash functions with a 32-bit (or narrower) output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Token32(pub u32);

impl Token for Token32 {
    fn min_value() -> Self {
        Token32(0)
    }

    fn max_value() -> Self {
        Token32(u32::MAX)
    }

    fn as_u128(&self) -> u128 {
        u128::from(self.0)
    }
}

impl fmt::Display for Token32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Token32 {
    fn from(value: u32) -> Self {
        Token32(value)
    }
}
