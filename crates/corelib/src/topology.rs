//! Ring topology analysis.
//!
//! Read-only views over a [`RingSnapshot`]: how much of the hash space each
//! node owns, and which keys change owner between two snapshots.

use crate::error::{Error, Result};
use crate::node::NodeIdentity;
use crate::partitioner::Partitioner;
use crate::ring::RingSnapshot;
use crate::token::Token;
use std::collections::HashMap;
use std::fmt;

/// Share of the position domain owned by one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Ownership<N> {
    pub node: N,
    /// Positions this node currently holds.
    pub vnodes: usize,
    /// Number of hash values routed to this node.
    pub span: u128,
    /// `span` as a fraction of the whole domain, in `0.0..=1.0`.
    pub share: f64,
}

/// A key whose owner differs between two ring snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration<N> {
    pub key: String,
    pub from: N,
    pub to: N,
}

impl<N: fmt::Display> fmt::Display for Migration<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.key, self.from, self.to)
    }
}

/// Ownership breakdown of one ring snapshot.
#[derive(Debug, Clone)]
pub struct Topology<N> {
    ownership: Vec<Ownership<N>>,
    domain: u128,
}

impl<N: NodeIdentity> Topology<N> {
    /// Computes ownership for a snapshot whose positions lie in `min..=max`.
    ///
    /// The owner of position `p[i]` is responsible for `(p[i-1], p[i]]`; the
    /// owner of the smallest position also gets the wrap-around arc
    /// `(p[last], max] ∪ [min, p[0]]`.
    ///
    /// Returns [`Error::InvalidArgument`] if `min > max` or a position lies
    /// outside the bounds.
    pub fn from_snapshot<T: Token>(snapshot: &RingSnapshot<T, N>, min: T, max: T) -> Result<Self> {
        if min > max {
            return Err(Error::InvalidArgument(format!(
                "empty position domain: min {} is above max {}",
                min, max
            )));
        }
        let tokens: Vec<T> = snapshot.tokens().collect();
        if let (Some(first), Some(last)) = (tokens.first(), tokens.last()) {
            if *first < min || *last > max {
                return Err(Error::InvalidArgument(format!(
                    "positions {}..={} fall outside the domain {}..={}",
                    first, last, min, max
                )));
            }
        }
        let domain = max.as_u128() - min.as_u128() + 1;

        let mut spans: HashMap<N, (usize, u128)> = HashMap::new();
        let mut order = Vec::new();
        for (i, vnode) in snapshot.iter().enumerate() {
            let span = if i == 0 {
                // tokens is non-empty here: we are visiting its first element
                let last = tokens[tokens.len() - 1].as_u128();
                (max.as_u128() - last) + (vnode.token.as_u128() - min.as_u128()) + 1
            } else {
                vnode.token.as_u128() - tokens[i - 1].as_u128()
            };
            let entry = spans.entry(vnode.owner.clone()).or_insert_with(|| {
                order.push(vnode.owner.clone());
                (0, 0)
            });
            entry.0 += 1;
            entry.1 += span;
        }

        let ownership = order
            .into_iter()
            .map(|node| {
                let (vnodes, span) = spans.get(&node).copied().unwrap_or_default();
                Ownership {
                    node,
                    vnodes,
                    span,
                    share: span as f64 / domain as f64,
                }
            })
            .collect();

        Ok(Self { ownership, domain })
    }

    /// Computes ownership using the partitioner's output domain.
    pub fn for_partitioner<P>(
        snapshot: &RingSnapshot<P::TokenType, N>,
        partitioner: &P,
    ) -> Result<Self>
    where
        P: Partitioner,
    {
        Self::from_snapshot(snapshot, partitioner.min_token(), partitioner.max_token())
    }

    /// Per-node ownership, in ring order of each node's first position.
    pub fn ownership(&self) -> &[Ownership<N>] {
        &self.ownership
    }

    pub fn share_of(&self, node: &N) -> f64 {
        self.ownership
            .iter()
            .find(|o| &o.node == node)
            .map_or(0.0, |o| o.share)
    }

    /// Size of the position domain the shares are relative to.
    pub fn domain(&self) -> u128 {
        self.domain
    }

    /// Ratio of the largest share to the ideal even share; 1.0 is perfect.
    pub fn imbalance(&self) -> f64 {
        if self.ownership.is_empty() {
            return 0.0;
        }
        let ideal = 1.0 / self.ownership.len() as f64;
        let largest = self
            .ownership
            .iter()
            .map(|o| o.share)
            .fold(0.0_f64, f64::max);
        largest / ideal
    }

    /// Keys from `keys` whose owner in `new` differs from their owner in `old`.
    ///
    /// Keys are hashed with `partitioner`, which must be the one both
    /// snapshots were built with. Keys that have no owner on either side
    /// (empty ring) are skipped.
    pub fn diff<P, I, K>(
        old: &RingSnapshot<P::TokenType, N>,
        new: &RingSnapshot<P::TokenType, N>,
        partitioner: &P,
        keys: I,
    ) -> Vec<Migration<N>>
    where
        P: Partitioner,
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter()
            .filter_map(|key| {
                let key = key.as_ref();
                let token = partitioner.partition(key);
                let (_, from) = old.successor(&token)?;
                let (_, to) = new.successor(&token)?;
                (from != to).then(|| Migration {
                    key: key.to_string(),
                    from: from.clone(),
                    to: to.clone(),
                })
            })
            .collect()
    }
}
