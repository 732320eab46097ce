//! Core library for consistent hashing implementation.
//!
//! This crate provides the fundamental abstractions for consistent hashing:
//! - Token types and implementations
//! - Partitioner (hash function) algorithms
//! - Node and virtual node abstractions
//! - The hash ring with copy-on-write snapshots
//! - Ownership and key-movement analysis
//!
//! # Example
//!
//! ```rust
//! use corelib::{HashRing, StringHashPartitioner};
//!
//! let ring = HashRing::with_nodes(StringHashPartitioner, 100, ["NodeA", "NodeB", "NodeC"])?;
//! let before = ring.lookup("Key1")?;
//!
//! ring.add("NodeD")?;
//! let after = ring.lookup("Key1")?;
//! assert!(after == before || after == "NodeD");
//! # Ok::<(), corelib::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod topology;
pub mod vnode;

pub use config::{PartitionerKind, RingConfig};
pub use error::{Error, Result};
pub use node::{Node, NodeId, NodeIdentity};
pub use partitioner::{Partitioner, StringHashPartitioner};
pub use ring::{HashRing, Ring, RingBuilder, RingSnapshot};
pub use token::Token;
pub use topology::{Migration, Topology};
pub use vnode::VirtualNode;
