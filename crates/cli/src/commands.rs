//! `ringctl` subcommands.

use clap::Subcommand;
use corelib::partitioner::Partitioner;
use corelib::{HashRing, Result, RingConfig, Topology};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Members used by `demo` when no nodes are configured.
const DEMO_NODES: [&str; 3] = ["NodeA", "NodeB", "NodeC"];
const DEMO_ADDED: &str = "NodeD";
const DEMO_KEYS: [&str; 3] = ["Key1", "Key2", "Key3"];

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the node each key routes to.
    Lookup {
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Print every ring position and its owner in ascending order.
    Dump,
    /// Route a few keys, add a node, route them again and dump the ring.
    Demo,
    /// Measure how many sampled keys move when members join or leave.
    Rebalance {
        /// Member to add (repeatable).
        #[arg(long)]
        add: Vec<String>,
        /// Member to remove (repeatable).
        #[arg(long)]
        remove: Vec<String>,
        /// Number of synthetic keys to sample.
        #[arg(long, default_value_t = 10_000)]
        samples: usize,
    },
    /// Print each member's share of the hash space.
    Ownership,
}

/// Key → owner pairs.
pub type Routes = Vec<(String, String)>;

#[derive(Debug, Clone, PartialEq)]
pub struct RebalanceReport {
    pub samples: usize,
    pub moved: usize,
    /// Moves that neither left a removed member nor reached an added one.
    pub unexpected: usize,
    pub nodes_before: usize,
    pub nodes_after: usize,
}

impl RebalanceReport {
    pub fn moved_fraction(&self) -> f64 {
        if self.samples == 0 {
            0.0
        } else {
            self.moved as f64 / self.samples as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Routes(Routes),
    Positions(Routes),
    Demo {
        before: Routes,
        added: String,
        after: Routes,
        positions: Routes,
    },
    Rebalance(RebalanceReport),
    /// (member, vnodes, share)
    Ownership(Vec<(String, usize, f64)>),
}

impl Command {
    /// Builds the configured ring with `partitioner` and runs the command on it.
    ///
    /// `demo` falls back to NodeA/NodeB/NodeC when no members are configured.
    pub fn execute<P: Partitioner>(
        &self,
        partitioner: P,
        config: &RingConfig,
    ) -> Result<CommandResult> {
        let nodes = if matches!(self, Command::Demo) && config.nodes.is_empty() {
            DEMO_NODES.iter().map(|n| n.to_string()).collect()
        } else {
            config.nodes.clone()
        };
        let ring = HashRing::with_nodes(partitioner, config.vnodes, nodes)?;
        debug!(tokens = ring.token_count(), "ring ready");
        self.execute_on(&ring)
    }

    fn execute_on<P: Partitioner>(&self, ring: &HashRing<String, P>) -> Result<CommandResult> {
        match self {
            Command::Lookup { keys } => Ok(CommandResult::Routes(route(ring, keys)?)),
            Command::Dump => Ok(CommandResult::Positions(positions(ring))),
            Command::Rebalance {
                add,
                remove,
                samples,
            } => rebalance(ring, add, remove, *samples).map(CommandResult::Rebalance),
            Command::Ownership => {
                let topology = Topology::for_partitioner(&*ring.snapshot(), ring.partitioner())?;
                Ok(CommandResult::Ownership(
                    topology
                        .ownership()
                        .iter()
                        .map(|o| (o.node.clone(), o.vnodes, o.share))
                        .collect(),
                ))
            }
            Command::Demo => demo(ring),
        }
    }
}

fn route<P, K>(ring: &HashRing<String, P>, keys: &[K]) -> Result<Routes>
where
    P: Partitioner,
    K: AsRef<str>,
{
    keys.iter()
        .map(|key| {
            let key = key.as_ref();
            ring.lookup(key).map(|node| (key.to_string(), node))
        })
        .collect()
}

fn positions<P: Partitioner>(ring: &HashRing<String, P>) -> Routes {
    ring.snapshot()
        .iter()
        .map(|vnode| (vnode.token.to_string(), vnode.owner))
        .collect()
}

fn demo<P: Partitioner>(ring: &HashRing<String, P>) -> Result<CommandResult> {
    let before = route(ring, &DEMO_KEYS)?;
    ring.add(DEMO_ADDED.to_string())?;
    let after = route(ring, &DEMO_KEYS)?;

    Ok(CommandResult::Demo {
        before,
        added: DEMO_ADDED.to_string(),
        after,
        positions: positions(ring),
    })
}

fn rebalance<P: Partitioner>(
    ring: &HashRing<String, P>,
    add: &[String],
    remove: &[String],
    samples: usize,
) -> Result<RebalanceReport> {
    let keys: Vec<String> = (0..samples).map(|i| format!("key-{}", i)).collect();
    let before = ring.snapshot();

    ring.change_membership(add, remove)?;
    let after = ring.snapshot();

    let added: HashSet<&String> = add.iter().collect();
    let removed: HashSet<&String> = remove.iter().collect();
    let migrations = Topology::diff(&*before, &*after, ring.partitioner(), &keys);
    let unexpected = migrations
        .iter()
        .filter(|m| !removed.contains(&m.from) && !added.contains(&m.to))
        .count();

    Ok(RebalanceReport {
        samples,
        moved: migrations.len(),
        unexpected,
        nodes_before: before.nodes().len(),
        nodes_after: after.nodes().len(),
    })
}

fn write_routes(f: &mut fmt::Formatter<'_>, routes: &Routes) -> fmt::Result {
    for (key, node) in routes {
        writeln!(f, "{} => {}", key, node)?;
    }
    Ok(())
}

fn write_positions(f: &mut fmt::Formatter<'_>, positions: &Routes) -> fmt::Result {
    for (token, node) in positions {
        writeln!(f, "Hash: {} => Node: {}", token, node)?;
    }
    Ok(())
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Routes(routes) => write_routes(f, routes),
            CommandResult::Positions(positions) => write_positions(f, positions),
            CommandResult::Demo {
                before,
                added,
                after,
                positions,
            } => {
                write_routes(f, before)?;
                writeln!(f, "\nAdding {}...\n", added)?;
                write_routes(f, after)?;
                writeln!(f, "\nHash Ring Snapshot:")?;
                write_positions(f, positions)
            }
            CommandResult::Rebalance(report) => {
                writeln!(f, "members: {} -> {}", report.nodes_before, report.nodes_after)?;
                writeln!(
                    f,
                    "moved: {} of {} sampled keys ({:.2}%)",
                    report.moved,
                    report.samples,
                    report.moved_fraction() * 100.0
                )?;
                writeln!(f, "unexpected moves: {}", report.unexpected)
            }
            CommandResult::Ownership(rows) => {
                for (node, vnodes, share) in rows {
                    writeln!(f, "{:<24} vnodes={:<6} share={:.2}%", node, vnodes, share * 100.0)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::partitioner::{StringHashPartitioner, Xxh3Partitioner};
    use corelib::Error;

    fn config(nodes: &[&str], vnodes: usize) -> RingConfig {
        RingConfig {
            vnodes,
            nodes: nodes.iter().map(|n| n.to_string()).collect(),
            ..RingConfig::default()
        }
    }

    #[test]
    fn test_lookup_routes() {
        let cmd = Command::Lookup {
            keys: vec!["C1".into(), "A3".into()],
        };
        let result = cmd
            .execute(StringHashPartitioner, &config(&["A", "B", "C"], 3))
            .unwrap();
        assert_eq!(
            result,
            CommandResult::Routes(vec![
                ("C1".to_string(), "C".to_string()),
                ("A3".to_string(), "B".to_string()),
            ])
        );
        assert_eq!(result.to_string(), "C1 => C\nA3 => B\n");
    }

    #[test]
    fn test_lookup_on_empty_ring() {
        let cmd = Command::Lookup {
            keys: vec!["k".into()],
        };
        let err = cmd.execute(StringHashPartitioner, &config(&[], 3)).unwrap_err();
        assert_eq!(err, Error::NoAvailableNode);
    }

    #[test]
    fn test_dump_is_ascending() {
        let result = Command::Dump
            .execute(StringHashPartitioner, &config(&["A", "B"], 2))
            .unwrap();
        assert_eq!(
            result.to_string(),
            "Hash: 2063 => Node: A\nHash: 2064 => Node: A\n\
             Hash: 2094 => Node: B\nHash: 2095 => Node: B\n"
        );
    }

    #[test]
    fn test_demo_changes_only_toward_added_node() {
        let result = Command::Demo
            .execute(StringHashPartitioner, &RingConfig::default())
            .unwrap();
        let CommandResult::Demo {
            before,
            after,
            positions,
            ..
        } = result
        else {
            panic!("expected demo output");
        };
        for ((key, old), (_, new)) in before.iter().zip(&after) {
            assert!(old == new || new == DEMO_ADDED, "{} moved {} -> {}", key, old, new);
        }
        assert_eq!(positions.len(), 400);
    }

    #[test]
    fn test_rebalance_only_moves_to_new_member() {
        let cmd = Command::Rebalance {
            add: vec!["d".into()],
            remove: vec![],
            samples: 5_000,
        };
        let result = cmd
            .execute(Xxh3Partitioner::new(0), &config(&["a", "b", "c"], 100))
            .unwrap();
        let CommandResult::Rebalance(report) = result else {
            panic!("expected rebalance output");
        };
        assert_eq!(report.unexpected, 0);
        assert_eq!((report.nodes_before, report.nodes_after), (3, 4));
        assert!((0.1..0.4).contains(&report.moved_fraction()));
    }

    #[test]
    fn test_rebalance_rejects_empty_member() {
        let cmd = Command::Rebalance {
            add: vec!["d".into()],
            remove: vec![String::new()],
            samples: 10,
        };
        let err = cmd
            .execute(Xxh3Partitioner::new(0), &config(&["a", "b"], 10))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_ownership_rows() {
        let result = Command::Ownership
            .execute(Xxh3Partitioner::new(0), &config(&["a", "b"], 50))
            .unwrap();
        let CommandResult::Ownership(rows) = result else {
            panic!("expected ownership output");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|(_, vnodes, _)| *vnodes == 50));
        let total: f64 = rows.iter().map(|(_, _, share)| share).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
}
