//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Instead of each physical node having a single position on the ring, each
//! node occupies `R` positions (virtual nodes). This provides:
//!
//! 1. **Better Load Distribution**: More positions = smoother distribution of keys
//! 2. **Gradual Rebalancing**: When nodes join/leave, only a fraction of keys move
//! 3. **Fault Tolerance**: Failure of one node spreads its keys across many successors
//!
//! # Position Derivation
//!
//! The `i`-th virtual node of a node sits at `hash(canonical ∥ i)`, where
//! `canonical` is the node's display string and `i` is written in decimal
//! with no separator (`"NodeA"` → `"NodeA0"`, `"NodeA1"`, ...). Removal
//! recomputes the same keys, so derivation must stay stable for the life of
//! a ring.
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(R) entries per node
//! - **Lookup**: O(log n) where n = total vnodes
//! - **Rebalancing**: roughly k/(N+1) keys move when the (N+1)-th node joins

use crate::node::NodeIdentity;
use crate::partitioner::Partitioner;
use crate::token::Token;
use std::fmt;

/// Key hashed to place the `index`-th virtual node of the node whose
/// canonical string is `node_key`.
#[inline]
pub fn vnode_key(node_key: &str, index: usize) -> String {
    format!("{}{}", node_key, index)
}

/// A virtual node on the hash ring: one (position, owner) entry.
///
/// # Invariants
///
/// - Within one ring snapshot every token appears at most once
/// - Ordering is by token first, so sorted vnodes follow the ring clockwise
///
/// # Example
///
/// ```rust
/// use corelib::partitioner::StringHashPartitioner;
/// use corelib::token::Token32;
/// use corelib::VirtualNode;
///
/// let vnode = VirtualNode::from_index(&StringHashPartitioner, "A", "A", 0);
/// assert_eq!(vnode.token(), Token32(2063));
/// assert_eq!(vnode.owner(), &"A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode<T, N> {
    /// Token position on the ring.
    pub token: T,
    /// The physical node that owns this position.
    ///
    /// Multiple virtual nodes share the same owner; a lookup finds the
    /// vnode and routes to this node.
    pub owner: N,
}

impl<T: Token, N: NodeIdentity> VirtualNode<T, N> {
    #[inline]
    pub fn new(token: T, owner: N) -> Self {
        Self { token, owner }
    }

    /// Create the `index`-th virtual node of `owner`.
    ///
    /// `node_key` is the owner's canonical string; callers that place many
    /// vnodes for one node compute it once and pass it in.
    ///
    /// # Performance
    /// - **Time**: O(k) where k = length of the formatted key (format + hash)
    pub fn from_index<P>(partitioner: &P, node_key: &str, owner: N, index: usize) -> Self
    where
        P: Partitioner<TokenType = T>,
    {
        let token = partitioner.partition(&vnode_key(node_key, index));
        Self::new(token, owner)
    }

    /// Get the token position.
    #[inline]
    pub fn token(&self) -> T {
        self.token
    }

    /// Get the owning node.
    #[inline]
    pub fn owner(&self) -> &N {
        &self.owner
    }

    /// Clockwise distance from this vnode to another.
    ///
    /// Useful for measuring ring gaps and load balance.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> u128 {
        self.token.distance_to(&other.token)
    }

    pub fn into_parts(self) -> (T, N) {
        (self.token, self.owner)
    }
}

impl<T: Token, N: NodeIdentity> fmt::Display for VirtualNode<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(token={}, node={})", self.token, self.owner)
    }
}
