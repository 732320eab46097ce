//! Node abstractions for the consistent hash ring.
//!
//! Nodes represent logical participants in the ring. The ring never looks
//! inside a node; it only needs to compare nodes and to turn each one into a
//! canonical string from which its virtual-node positions are hashed.

use crate::error::{Error, Result};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// Anything that can own positions on the ring.
///
/// Blanket-implemented for every cloneable, comparable, displayable type, so
/// `String`, `&'static str`, [`NodeId`] and [`Node`] all work out of the box.
/// The `Display` output is the canonical string used for hashing; see
/// [`ring_key`].
pub trait NodeIdentity: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static {}

impl<T> NodeIdentity for T where T: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static {}

/// Canonical string a node's virtual-node positions are hashed from.
pub fn ring_key<N: NodeIdentity>(node: &N) -> String {
    node.to_string()
}

/// Returns the node's canonical string, rejecting identities that render empty.
pub(crate) fn validated_key<N: NodeIdentity>(node: &N) -> Result<String> {
    let key = ring_key(node);
    if key.is_empty() {
        return Err(Error::InvalidArgument(format!(
            "node identity {:?} has an empty canonical string",
            node
        )));
    }
    Ok(key)
}

/// Compact identifier for a node in the cluster.
///
/// Newtype over `u128` so comparisons and hashing are very fast while giving
/// plenty of space for uniqueness.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub u128);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Logical node participating in the ring.
///
/// Keep this struct small and cheap to clone; heavy mutable state (connections,
/// metrics, etc.) should live elsewhere. Its ring position derives from `name`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Node {
    pub id: NodeId,
    /// Human‑readable name or hostname.
    pub name: String,
}

impl Node {
    /// Construct a new node with basic metadata.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
