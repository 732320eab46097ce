//! Hash ring data structure.
//!
//! [`HashRing`] owns the current [`RingSnapshot`] and serialises mutations.
//! Lookups never wait on each other and never observe half of a node's
//! virtual nodes: every add/remove is built on a private copy and published
//! with a single pointer swap.

use crate::error::{Error, Result};
use crate::node::{validated_key, NodeIdentity};
use crate::partitioner::{Partitioner, StringHashPartitioner};
use crate::ring::snapshot::RingSnapshot;
use crate::vnode::{vnode_key, VirtualNode};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

type Snapshot<N, P> = RingSnapshot<<P as Partitioner>::TokenType, N>;

/// Consistent hash ring with `R` virtual nodes per physical node.
///
/// # Collision policy
///
/// Positions are unique. When a new vnode hashes onto an occupied position
/// the newer owner wins, and `remove` deletes every position the removed
/// node would generate even if another node has since taken it over. Both
/// cases are logged.
///
/// # Example
///
/// ```rust
/// use corelib::partitioner::StringHashPartitioner;
/// use corelib::ring::HashRing;
///
/// let ring = HashRing::with_nodes(StringHashPartitioner, 3, ["A", "B", "C"]).unwrap();
/// let owner = ring.lookup("Key1").unwrap();
/// assert!(["A", "B", "C"].contains(&owner));
/// ```
pub struct HashRing<N, P = StringHashPartitioner>
where
    P: Partitioner,
{
    partitioner: Arc<P>,
    vnodes: usize,
    current: RwLock<Arc<Snapshot<N, P>>>,
    /// Held for the whole copy-modify-publish sequence of a mutation.
    writer: Mutex<()>,
}

impl<N, P> HashRing<N, P>
where
    N: NodeIdentity,
    P: Partitioner,
{
    /// Creates an empty ring placing `vnodes` positions per node.
    ///
    /// Returns [`Error::Configuration`] if `vnodes` is zero.
    pub fn new(partitioner: P, vnodes: usize) -> Result<Self> {
        if vnodes == 0 {
            return Err(Error::Configuration(
                "virtual nodes per node must be at least 1".into(),
            ));
        }
        Ok(Self {
            partitioner: Arc::new(partitioner),
            vnodes,
            current: RwLock::new(Arc::new(RingSnapshot::empty())),
            writer: Mutex::new(()),
        })
    }

    /// Creates a ring already populated with `nodes`.
    ///
    /// All nodes are validated before any is placed.
    pub fn with_nodes<I>(partitioner: P, vnodes: usize, nodes: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
    {
        let ring = Self::new(partitioner, vnodes)?;
        ring.add_all(nodes)?;
        debug!(
            partitioner = ring.partitioner.name(),
            vnodes,
            tokens = ring.token_count(),
            "constructed hash ring"
        );
        Ok(ring)
    }

    /// Places all `R` virtual nodes of `node`.
    ///
    /// Re-adding a node regenerates the same positions, so it is a no-op
    /// unless another node has overwritten some of them in between.
    pub fn add(&self, node: N) -> Result<()> {
        self.change_membership(std::slice::from_ref(&node), &[])
    }

    /// Places several nodes and publishes them as one change.
    pub fn add_all<I>(&self, nodes: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
    {
        let nodes: Vec<N> = nodes.into_iter().collect();
        self.change_membership(&nodes, &[])
    }

    /// Deletes every position `node` generates.
    ///
    /// Removing a node that is not on the ring is a no-op.
    pub fn remove(&self, node: &N) -> Result<()> {
        self.remove_all(std::slice::from_ref(node))
    }

    /// Removes several nodes and publishes them as one change.
    pub fn remove_all(&self, nodes: &[N]) -> Result<()> {
        self.change_membership(&[], nodes)
    }

    /// Adds `add`, then removes `remove`, published as one change.
    ///
    /// Every node in both lists is validated first; on error the ring is
    /// left untouched.
    pub fn change_membership(&self, add: &[N], remove: &[N]) -> Result<()> {
        let added = with_keys(add)?;
        let removed = with_keys(remove)?;
        if added.is_empty() && removed.is_empty() {
            return Ok(());
        }

        self.mutate(|snapshot| {
            for (key, node) in &added {
                self.place(snapshot, key, node);
            }
            for (key, node) in &removed {
                self.evict(snapshot, key, node);
            }
        });
        Ok(())
    }

    fn place(&self, snapshot: &mut Snapshot<N, P>, key: &str, node: &N) {
        for index in 0..self.vnodes {
            let vnode = VirtualNode::from_index(&*self.partitioner, key, node.clone(), index);
            let token = vnode.token();
            trace!(node = %node, %token, index, "placing vnode");
            if let Some(previous) = snapshot.insert(vnode) {
                if &previous != node {
                    warn!(
                        %token,
                        previous = %previous,
                        node = %node,
                        "position collision, newer node takes ownership"
                    );
                }
            }
        }
        debug!(node = %node, vnodes = self.vnodes, "added node to ring");
    }

    fn evict(&self, snapshot: &mut Snapshot<N, P>, key: &str, node: &N) {
        let mut removed = 0usize;
        for index in 0..self.vnodes {
            let token = self.partitioner.partition(&vnode_key(key, index));
            match snapshot.remove(&token) {
                Some(owner) if &owner != node => {
                    warn!(
                        %token,
                        owner = %owner,
                        node = %node,
                        "removed position owned by another node"
                    );
                    removed += 1;
                }
                Some(_) => removed += 1,
                None => {}
            }
        }
        debug!(node = %node, removed, "removed node from ring");
    }

    /// Finds the node responsible for `key`.
    ///
    /// Returns the owner of the smallest position `>= hash(key)`, wrapping to
    /// the smallest position on the ring, or [`Error::NoAvailableNode`] if
    /// the ring is empty.
    ///
    /// # Performance
    /// - **Time**: O(log n) plus one hash of `key`
    pub fn lookup(&self, key: &str) -> Result<N> {
        self.lookup_vnode(key).map(|vnode| vnode.owner)
    }

    /// Like [`lookup`](Self::lookup) but also reports which position answered.
    pub fn lookup_vnode(&self, key: &str) -> Result<VirtualNode<P::TokenType, N>> {
        let snapshot = self.snapshot();
        let token = self.partitioner.partition(key);
        snapshot
            .successor(&token)
            .map(|(position, owner)| VirtualNode::new(*position, owner.clone()))
            .ok_or(Error::NoAvailableNode)
    }

    /// The `R` positions `node` generates, whether or not it is on the ring.
    pub fn positions_for(&self, node: &N) -> Result<Vec<P::TokenType>> {
        let key = validated_key(node)?;
        Ok((0..self.vnodes)
            .map(|index| self.partitioner.partition(&vnode_key(&key, index)))
            .collect())
    }

    /// The currently published snapshot.
    ///
    /// The snapshot stays valid and unchanged however the ring is mutated
    /// afterwards.
    pub fn snapshot(&self) -> Arc<Snapshot<N, P>> {
        Arc::clone(&self.current.read())
    }

    /// Number of distinct nodes owning at least one position.
    pub fn node_count(&self) -> usize {
        self.snapshot().nodes().len()
    }

    /// Number of occupied positions.
    pub fn token_count(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Virtual nodes placed per physical node (`R`).
    pub fn replication_factor(&self) -> usize {
        self.vnodes
    }

    pub fn partitioner(&self) -> &P {
        &self.partitioner
    }

    pub fn partitioner_name(&self) -> &'static str {
        self.partitioner.name()
    }

    /// Copy, modify, publish. Concurrent writers queue on `writer`.
    fn mutate<F>(&self, apply: F)
    where
        F: FnOnce(&mut Snapshot<N, P>),
    {
        let _guard = self.writer.lock();
        let current = self.snapshot();
        let mut next: Snapshot<N, P> = (*current).clone();
        apply(&mut next);
        *self.current.write() = Arc::new(next);
    }
}

/// Pairs each node with its validated canonical string.
fn with_keys<N: NodeIdentity>(nodes: &[N]) -> Result<Vec<(String, &N)>> {
    nodes
        .iter()
        .map(|node| validated_key(node).map(|key| (key, node)))
        .collect()
}

impl<N, P> fmt::Debug for HashRing<N, P>
where
    N: NodeIdentity,
    P: Partitioner,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("partitioner", &self.partitioner.name())
            .field("vnodes", &self.vnodes)
            .field("tokens", &self.token_count())
            .finish()
    }
}
