//! CLI entry point for ringctl.
//!
//! ```text
//! ringctl demo                                   # the add-a-node walkthrough
//! ringctl -n a,b,c lookup user:1 user:2          # route keys
//! ringctl -n a,b,c --partitioner xxh3 dump       # list every position
//! ringctl -n a,b,c rebalance --add d             # measure key movement
//! ringctl -c ring.json ownership                 # hash-space share per node
//! ```

use clap::Parser;
use ringctl::CliConfig;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    config.run()
}
