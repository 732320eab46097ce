//! Command-line and file configuration for `ringctl`.

use crate::commands::Command;
use anyhow::{Context, Result};
use clap::Parser;
use corelib::{PartitionerKind, RingConfig};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "ringctl",
    version,
    about = "Inspect and exercise a consistent hash ring"
)]
pub struct CliConfig {
    /// Path to a JSON ring config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Ring members, comma separated or repeated. Overrides the config file.
    #[arg(short = 'n', long = "node", global = true, value_delimiter = ',')]
    pub nodes: Vec<String>,

    /// Virtual nodes per member.
    #[arg(long, global = true)]
    pub vnodes: Option<usize>,

    /// Hash function: string-hash, sip, xxh3 or blake3.
    #[arg(long, global = true)]
    pub partitioner: Option<PartitionerKind>,

    /// Seed for the seeded hash functions.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Merges the config file (if any) with command-line overrides.
    pub fn ring_config(&self) -> Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RingConfig::default(),
        };
        if !self.nodes.is_empty() {
            config.nodes = self.nodes.clone();
        }
        if let Some(vnodes) = self.vnodes {
            config.vnodes = vnodes;
        }
        if let Some(partitioner) = self.partitioner {
            config.partitioner = partitioner;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn load_config(path: &Path) -> Result<RingConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))
}
