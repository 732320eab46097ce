//! Ring configuration.
//!
//! `RingConfig` is the serializable configuration surface: how many virtual
//! nodes each node gets, which hash function places them, and the initial
//! membership. Loading from disk is left to the caller.

use crate::error::{Error, Result};
use crate::ring::DEFAULT_VNODES;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Built-in partitioners selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartitionerKind {
    /// [`StringHashPartitioner`](crate::partitioner::StringHashPartitioner)
    #[default]
    StringHash,
    /// [`SipPartitioner`](crate::partitioner::SipPartitioner), keyed by `seed`
    Sip,
    /// [`Xxh3Partitioner`](crate::partitioner::Xxh3Partitioner), seeded by `seed`
    Xxh3,
    /// [`Blake3Partitioner`](crate::partitioner::Blake3Partitioner)
    Blake3,
}

impl PartitionerKind {
    pub const ALL: [PartitionerKind; 4] = [
        PartitionerKind::StringHash,
        PartitionerKind::Sip,
        PartitionerKind::Xxh3,
        PartitionerKind::Blake3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionerKind::StringHash => "string-hash",
            PartitionerKind::Sip => "sip",
            PartitionerKind::Xxh3 => "xxh3",
            PartitionerKind::Blake3 => "blake3",
        }
    }
}

impl fmt::Display for PartitionerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartitionerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        PartitionerKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "unknown partitioner '{}', expected one of: string-hash, sip, xxh3, blake3",
                    s
                ))
            })
    }
}

/// Configuration for building a ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Virtual nodes per physical node.
    pub vnodes: usize,
    pub partitioner: PartitionerKind,
    /// Seed for the seeded partitioners; ignored by the others.
    pub seed: u64,
    /// Initial node names.
    pub nodes: Vec<String>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            vnodes: DEFAULT_VNODES,
            partitioner: PartitionerKind::default(),
            seed: 0,
            nodes: Vec::new(),
        }
    }
}

impl RingConfig {
    pub fn validate(&self) -> Result<()> {
        if self.vnodes == 0 {
            return Err(Error::Configuration(
                "vnodes must be at least 1".to_string(),
            ));
        }
        if self.nodes.iter().any(|name| name.is_empty()) {
            return Err(Error::Configuration(
                "node names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
