//! Comprehensive tests for the hash ring implementation.
//!
//! # Test Strategy
//!
//! 1. **Basic functionality**: Empty ring, add/lookup, remove
//! 2. **Multiple nodes**: Distribution, consistency
//! 3. **Edge cases**: Wraparound, single node, idempotent add
//! 4. **Membership changes**: the routing scenario from the demo

use corelib::node::{Node, NodeId};
use corelib::partitioner::{SipPartitioner, StringHashPartitioner, Xxh3Partitioner};
use corelib::ring::{HashRing, RingBuilder};
use corelib::token::Token32;
use corelib::Error;

fn node(id: u128) -> Node {
    Node::new(NodeId(id), format!("node{}", id))
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

#[test]
fn test_empty_ring_lookup() {
    let ring: HashRing<Node> = HashRing::new(StringHashPartitioner, 4).unwrap();
    assert_eq!(ring.lookup("key1"), Err(Error::NoAvailableNode));
    assert!(matches!(ring.lookup_vnode("key1"), Err(Error::NoAvailableNode)));
    assert_eq!(ring.node_count(), 0);
    assert_eq!(ring.token_count(), 0);
}

#[test]
fn test_add_node_and_lookup() {
    let ring = HashRing::new(Xxh3Partitioner::new(0), 4).unwrap();
    ring.add(node(1)).unwrap();

    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.token_count(), 4);
    assert_eq!(ring.lookup("test-key").unwrap().id, NodeId(1));
}

#[test]
fn test_remove_node() {
    let ring = HashRing::new(Xxh3Partitioner::new(0), 4).unwrap();
    ring.add(node(1)).unwrap();
    ring.add(node(2)).unwrap();
    assert_eq!(ring.token_count(), 8);

    ring.remove(&node(1)).unwrap();

    assert_eq!(ring.node_count(), 1);
    assert_eq!(ring.token_count(), 4);
    assert_eq!(ring.lookup("some-key").unwrap(), node(2));
    assert!(!ring.snapshot().contains_node(&node(1)));

    // Removing a node that is not there is a silent no-op.
    ring.remove(&node(999)).unwrap();
    ring.remove(&node(1)).unwrap();
    assert_eq!(ring.token_count(), 4);
}

#[test]
fn test_remove_last_node_empties_ring() {
    let ring = HashRing::with_nodes(SipPartitioner::new(1), 8, [node(1)]).unwrap();
    ring.remove(&node(1)).unwrap();
    assert!(ring.is_empty());
    assert_eq!(ring.lookup("key"), Err(Error::NoAvailableNode));
}

// ============================================================================
// Multiple Nodes Tests
// ============================================================================

#[test]
fn test_multiple_nodes() {
    let nodes = vec![node(1), node(2), node(3)];
    let ring = HashRing::with_nodes(Xxh3Partitioner::new(0), 4, nodes.clone()).unwrap();

    assert_eq!(ring.node_count(), 3);
    assert_eq!(ring.token_count(), 12);

    for key in ["key1", "key2", "key3"] {
        let owner = ring.lookup(key).unwrap();
        assert!(nodes.contains(&owner), "{} should map to a ring member", key);
    }
}

#[test]
fn test_consistent_lookup() {
    let ring = HashRing::with_nodes(Xxh3Partitioner::new(0), 4, [node(1), node(2)]).unwrap();

    let first = ring.lookup("consistent-key").unwrap();
    for _ in 0..10 {
        assert_eq!(ring.lookup("consistent-key").unwrap(), first);
    }
}

#[test]
fn test_every_node_gets_keys() {
    let ring =
        HashRing::with_nodes(Xxh3Partitioner::new(11), 128, (1..=4).map(node)).unwrap();

    let mut counts = std::collections::HashMap::new();
    for i in 0..8_000 {
        *counts.entry(ring.lookup(&format!("key-{}", i)).unwrap().id).or_insert(0usize) += 1;
    }
    assert_eq!(counts.len(), 4);
    for (id, count) in counts {
        // 2000 expected per node; 128 vnodes keeps each well inside this band.
        assert!((1_000..3_000).contains(&count), "{} got {}", id, count);
    }
}

// ============================================================================
// Ring Builder Tests
// ============================================================================

#[test]
fn test_ring_builder_default() {
    let ring = RingBuilder::new()
        .add_node(node(1))
        .add_node(node(2))
        .build()
        .unwrap();

    assert!(ring.lookup("key").is_ok());
    assert_eq!(ring.node_count(), 2);
    // Default is 100 vnodes per node; "node1"+i and "node2"+i never collide.
    assert_eq!(ring.token_count(), 200);
}

#[test]
fn test_ring_builder_custom_vnodes() {
    let ring = RingBuilder::new()
        .partitioner(SipPartitioner::new(5))
        .with_vnodes(8)
        .add_nodes([node(1), node(2)])
        .build()
        .unwrap();

    assert_eq!(ring.node_count(), 2);
    assert_eq!(ring.token_count(), 16);
    assert_eq!(ring.partitioner_name(), "SipPartitioner");
}

// ============================================================================
// Edge Cases
// ============================================================================

#[test]
fn test_single_node() {
    let ring = HashRing::with_nodes(Xxh3Partitioner::new(0), 4, [node(1)]).unwrap();
    for key in ["key1", "key2", "key3", "very-long-key-name", ""] {
        assert_eq!(ring.lookup(key).unwrap(), node(1));
    }
}

#[test]
fn test_wraparound_to_smallest_position() {
    let ring = HashRing::with_nodes(StringHashPartitioner, 3, ["A", "B", "C"]).unwrap();
    let smallest = ring.snapshot().iter().next().unwrap();
    assert_eq!(smallest.token, Token32(2063));

    // Every one of these hashes above C2 = 2127, the largest position.
    for key in ["Key1", "Key2", "Key3", "zzzz"] {
        let hit = ring.lookup_vnode(key).unwrap();
        assert_eq!(hit.token, smallest.token);
        assert_eq!(hit.owner, "A");
    }
}

#[test]
fn test_add_remove_add() {
    let ring = HashRing::new(Xxh3Partitioner::new(0), 4).unwrap();

    ring.add(node(1)).unwrap();
    let positions = ring.snapshot();
    ring.remove(&node(1)).unwrap();
    assert_eq!(ring.node_count(), 0);

    ring.add(node(1)).unwrap();
    assert_eq!(*ring.snapshot(), *positions);
}

#[test]
fn test_idempotent_add() {
    let ring = HashRing::new(StringHashPartitioner, 4).unwrap();
    ring.add(node(1)).unwrap();
    let once = ring.snapshot();

    ring.add(node(1)).unwrap();
    assert_eq!(ring.token_count(), 4);
    assert_eq!(*ring.snapshot(), *once);
}

#[test]
fn test_empty_node_identity_rejected() {
    let ring: HashRing<String> = HashRing::new(StringHashPartitioner, 4).unwrap();
    assert!(matches!(ring.add(String::new()), Err(Error::InvalidArgument(_))));
    assert!(matches!(
        HashRing::with_nodes(StringHashPartitioner, 4, ["ok", ""]),
        Err(Error::InvalidArgument(_))
    ));
}

// ============================================================================
// Membership Changes
// ============================================================================

#[test]
fn test_added_node_only_takes_keys() {
    let ring = HashRing::with_nodes(StringHashPartitioner, 3, ["A", "B", "C"]).unwrap();
    let keys = ["Key1", "Key2", "Key3", "C3", "A3", "B"];
    let before: Vec<_> = keys.iter().map(|k| ring.lookup(k).unwrap()).collect();

    ring.add("D").unwrap();

    let mut moved = 0;
    for (key, old) in keys.iter().zip(&before) {
        let new = ring.lookup(key).unwrap();
        if new != *old {
            assert_eq!(new, "D", "{} moved to {} instead of the new node", key, new);
            moved += 1;
        }
    }
    // "C3" (2128) used to wrap to A and is now caught by D0 (2156).
    assert_eq!(moved, 1);
    assert_eq!(ring.lookup("C3").unwrap(), "D");
}

#[test]
fn test_positions_for_matches_snapshot() {
    let ring = HashRing::with_nodes(Xxh3Partitioner::new(2), 16, [node(1), node(2)]).unwrap();
    let snapshot = ring.snapshot();
    for token in ring.positions_for(&node(2)).unwrap() {
        assert_eq!(snapshot.owner_at(&token), Some(&node(2)));
    }
}

#[test]
fn test_get_all_tokens() {
    let ring = HashRing::with_nodes(Xxh3Partitioner::new(0), 4, [node(1)]).unwrap();
    let vnodes: Vec<_> = ring.snapshot().iter().collect();
    assert_eq!(vnodes.len(), 4);
    assert!(vnodes.iter().all(|v| v.owner == node(1)));
    assert!(vnodes.windows(2).all(|w| w[0].token < w[1].token));
}

#[test]
fn test_partitioner_name() {
    let ring: HashRing<Node> = HashRing::new(StringHashPartitioner, 1).unwrap();
    assert_eq!(ring.partitioner_name(), "StringHashPartitioner");
}
