//! Core token trait definitions.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// A position on the hash ring.
///
/// Tokens are immutable, totally ordered integers. The ring keeps its
/// entries sorted by token, and a key belongs to the first token at or
/// after the key's own token.
pub trait Token: Copy + Ord + Hash + Send + Sync + Debug + Display + 'static {
    /// Smallest value of the token type.
    fn min_value() -> Self;
    /// Largest value of the token type.
    fn max_value() -> Self;
    /// Widens the token for arithmetic over the position domain.
    fn as_u128(&self) -> u128;

    /// True if this token is the minimum.
    fn is_min(&self) -> bool {
        *self == Self::min_value()
    }

    /// True if this token is the maximum.
    fn is_max(&self) -> bool {
        *self == Self::max_value()
    }

    /// Clockwise distance from `self` to `other` on the ring.
    fn distance_to(&self, other: &Self) -> u128 {
        let (from, to) = (self.as_u128(), other.as_u128());
        if to >= from {
            to - from
        } else {
            (Self::max_value().as_u128() - from) + to + 1
        }
    }
}
