//! CLI tool for inspecting consistent hash rings.
//!
//! Provides commands for:
//! - Routing keys to nodes
//! - Dumping ring positions
//! - Measuring key movement on membership changes
//! - Reporting per-node ownership

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;

use anyhow::Result;
use corelib::partitioner::{
    Blake3Partitioner, SipPartitioner, StringHashPartitioner, Xxh3Partitioner,
};
use corelib::PartitionerKind;
use tracing::info;

impl CliConfig {
    /// Runs the selected command and prints its result.
    pub fn run(self) -> Result<()> {
        setup_tracing(&self.log_level);
        let config = self.ring_config()?;
        info!(
            partitioner = %config.partitioner,
            vnodes = config.vnodes,
            nodes = config.nodes.len(),
            "ring configuration"
        );

        let result = match config.partitioner {
            PartitionerKind::StringHash => self.command.execute(StringHashPartitioner, &config)?,
            PartitionerKind::Sip => self.command.execute(SipPartitioner::new(config.seed), &config)?,
            PartitionerKind::Xxh3 => {
                self.command.execute(Xxh3Partitioner::new(config.seed), &config)?
            }
            PartitionerKind::Blake3 => self.command.execute(Blake3Partitioner, &config)?,
        };
        print!("{}", result);
        Ok(())
    }
}

/// Initialize the `tracing` subscriber with the given level filter.
///
/// Respects `RUST_LOG` env var if set, otherwise uses `level`.
fn setup_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
