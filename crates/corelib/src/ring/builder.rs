//! Builder for [`HashRing`].

use crate::error::Result;
use crate::node::NodeIdentity;
use crate::partitioner::{Partitioner, StringHashPartitioner};
use crate::ring::ring::HashRing;

/// Virtual nodes per node when the builder is not told otherwise.
pub const DEFAULT_VNODES: usize = 100;

/// Fluent construction of a [`HashRing`].
///
/// ```rust
/// use corelib::partitioner::Xxh3Partitioner;
/// use corelib::ring::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .partitioner(Xxh3Partitioner::new(0))
///     .with_vnodes(8)
///     .add_node("cache-1")
///     .add_node("cache-2")
///     .build()
///     .unwrap();
/// assert_eq!(ring.token_count(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct RingBuilder<N, P = StringHashPartitioner> {
    partitioner: P,
    vnodes: usize,
    nodes: Vec<N>,
}

impl<N: NodeIdentity> RingBuilder<N> {
    /// Builder using [`StringHashPartitioner`] and [`DEFAULT_VNODES`].
    pub fn new() -> Self {
        Self {
            partitioner: StringHashPartitioner,
            vnodes: DEFAULT_VNODES,
            nodes: Vec::new(),
        }
    }
}

impl<N: NodeIdentity> Default for RingBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, P> RingBuilder<N, P>
where
    N: NodeIdentity,
    P: Partitioner,
{
    /// Swap the hash function.
    pub fn partitioner<Q: Partitioner>(self, partitioner: Q) -> RingBuilder<N, Q> {
        RingBuilder {
            partitioner,
            vnodes: self.vnodes,
            nodes: self.nodes,
        }
    }

    /// Virtual nodes per physical node. Zero is rejected by [`build`](Self::build).
    pub fn with_vnodes(mut self, vnodes: usize) -> Self {
        self.vnodes = vnodes;
        self
    }

    pub fn add_node(mut self, node: N) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn add_nodes<I: IntoIterator<Item = N>>(mut self, nodes: I) -> Self {
        self.nodes.extend(nodes);
        self
    }

    pub fn build(self) -> Result<HashRing<N, P>> {
        HashRing::with_nodes(self.partitioner, self.vnodes, self.nodes)
    }
}
