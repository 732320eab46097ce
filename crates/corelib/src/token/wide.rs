//! 64-bit token implementation.

use crate::token::traits::Token;
use std::fmt;

/// Token for hash functions with a full 64-bit output.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Token64(pub u64);

impl Token for Token64 {
    fn min_value() -> Self {
        Token64(0)
    }

    fn max_value() -> Self {
        Token64(u64::MAX)
    }

    fn as_u128(&self) -> u128 {
        u128::from(self.0)
    }
}

impl fmt::Display for Token64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Token64 {
    fn from(value: u64) -> Self {
        Token64(value)
    }
}
