//! Immutable, position-ordered view of the ring.

use crate::node::NodeIdentity;
use crate::token::Token;
use crate::vnode::VirtualNode;
use std::collections::{BTreeMap, HashSet};

/// Ordered `position → owner` map with successor lookup.
///
/// A published snapshot is never mutated; [`HashRing`](super::HashRing)
/// clones it, applies a whole add/remove, and publishes the clone. Anyone
/// holding an `Arc<RingSnapshot>` therefore sees one consistent ring for as
/// long as they keep it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingSnapshot<T, N> {
    positions: BTreeMap<T, N>,
}

impl<T: Token, N: NodeIdentity> RingSnapshot<T, N> {
    pub fn empty() -> Self {
        Self {
            positions: BTreeMap::new(),
        }
    }

    /// Number of occupied positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// The entry at the smallest position `>= token`, wrapping to the
    /// smallest position overall. `None` only when the ring is empty.
    ///
    /// # Performance
    /// - **Time**: O(log n)
    pub fn successor(&self, token: &T) -> Option<(&T, &N)> {
        self.positions
            .range(token..)
            .next()
            .or_else(|| self.positions.iter().next())
    }

    /// Owner of exactly `token`, if that position is occupied.
    pub fn owner_at(&self, token: &T) -> Option<&N> {
        self.positions.get(token)
    }

    /// Lazily walks every entry in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = VirtualNode<T, N>> + '_ {
        self.positions
            .iter()
            .map(|(token, owner)| VirtualNode::new(*token, owner.clone()))
    }

    /// Positions only, ascending.
    pub fn tokens(&self) -> impl Iterator<Item = T> + '_ {
        self.positions.keys().copied()
    }

    /// Distinct owners, in order of their first position on the ring.
    pub fn nodes(&self) -> Vec<N> {
        let mut seen = HashSet::new();
        self.positions
            .values()
            .filter(|owner| seen.insert(*owner))
            .cloned()
            .collect()
    }

    /// True if `node` owns at least one position.
    pub fn contains_node(&self, node: &N) -> bool {
        self.positions.values().any(|owner| owner == node)
    }

    /// Number of positions currently owned by `node`.
    pub fn positions_owned_by(&self, node: &N) -> usize {
        self.positions.values().filter(|owner| *owner == node).count()
    }

    /// Upserts an entry and returns the owner it displaced, if any.
    pub(crate) fn insert(&mut self, vnode: VirtualNode<T, N>) -> Option<N> {
        let (token, owner) = vnode.into_parts();
        self.positions.insert(token, owner)
    }

    /// Deletes the entry at `token` whoever owns it.
    pub(crate) fn remove(&mut self, token: &T) -> Option<N> {
        self.positions.remove(token)
    }
}

impl<T: Token, N: NodeIdentity> Default for RingSnapshot<T, N> {
    fn default() -> Self {
        Self::empty()
    }
}
