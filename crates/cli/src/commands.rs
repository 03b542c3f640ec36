//! Subcommands and their printable results.

use anyhow::{bail, Result};
use clap::Subcommand;
use corelib::topology::{relative_std_dev, NodeShare};
use corelib::{ConsistentHash, Ownership};
use placement::{PlacementStrategy, SimpleStrategy};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the node owning a key, followed by its failover nodes.
    Lookup {
        key: String,
        /// Nodes to return, primary included.
        #[arg(long, default_value_t = 1)]
        replicas: usize,
    },
    /// Print each node's share of the ring.
    Inspect,
    /// Distribute synthetic keys, then report how many move after a change.
    Simulate {
        /// Number of synthetic keys.
        #[arg(long, default_value_t = 100_000)]
        keys: usize,
        /// Node to remove after the first pass.
        #[arg(long, conflicts_with = "add")]
        remove: Option<String>,
        /// Node to add after the first pass.
        #[arg(long)]
        add: Option<String>,
    },
}

/// Key counts per node from one simulation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    pub counts: BTreeMap<String, usize>,
    pub relative_std_dev: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Lookup {
        key: String,
        nodes: Vec<String>,
    },
    Inspect {
        hasher: &'static str,
        vnodes: u32,
        shares: Vec<NodeShare<String>>,
        relative_std_dev: f64,
    },
    Simulate {
        keys: usize,
        before: Distribution,
        change: Option<String>,
        after: Option<Distribution>,
        moved: usize,
    },
}

impl Command {
    pub fn execute(&self, ring: &ConsistentHash<String>) -> Result<CommandResult> {
        match self {
            Command::Lookup { key, replicas } => {
                let strategy = SimpleStrategy::new(*replicas)?;
                let placement = strategy.place(ring, key.as_bytes())?;
                Ok(CommandResult::Lookup {
                    key: key.clone(),
                    nodes: placement.into_nodes(),
                })
            }
            Command::Inspect => {
                let ownership = Ownership::of(&ring.snapshot());
                Ok(CommandResult::Inspect {
                    hasher: ring.hasher_name(),
                    vnodes: ring.vnodes_per_node(),
                    relative_std_dev: ownership.relative_std_dev(),
                    shares: ownership.shares().to_vec(),
                })
            }
            Command::Simulate { keys, remove, add } => simulate(ring, *keys, remove.as_deref(), add.as_deref()),
        }
    }
}

fn simulate(
    ring: &ConsistentHash<String>,
    keys: usize,
    remove: Option<&str>,
    add: Option<&str>,
) -> Result<CommandResult> {
    let before = assign(ring, keys);
    let before_dist = distribution(&before);

    let change = match (remove, add) {
        (Some(node), _) => {
            if !ring.remove_node(&node.to_string()) {
                bail!("node {} is not a ring member", node);
            }
            Some(format!("removed {}", node))
        }
        (None, Some(node)) => {
            if ring.contains(&node.to_string()) {
                bail!("node {} is already a ring member", node);
            }
            ring.add_node(node.to_string());
            Some(format!("added {}", node))
        }
        (None, None) => None,
    };

    let (after, moved) = match change {
        Some(_) => {
            let after = assign(ring, keys);
            // A key left without an owner counts as moved.
            let moved = before.iter().zip(&after).filter(|(a, b)| a != b).count();
            (Some(distribution(&after)), moved)
        }
        None => (None, 0),
    };

    Ok(CommandResult::Simulate {
        keys,
        before: before_dist,
        change,
        after,
        moved,
    })
}

/// Owner of each synthetic key, indexed by key number.
fn assign(ring: &ConsistentHash<String>, keys: usize) -> Vec<Option<String>> {
    let snapshot = ring.snapshot();
    (0..keys)
        .map(|i| snapshot.locate(format!("key-{}", i).as_bytes()).cloned())
        .collect()
}

fn distribution(owners: &[Option<String>]) -> Distribution {
    let mut counts = BTreeMap::new();
    for owner in owners.iter().flatten() {
        *counts.entry(owner.clone()).or_insert(0) += 1;
    }
    let relative_std_dev = relative_std_dev(counts.values().map(|&c| c as f64));
    Distribution {
        counts,
        relative_std_dev,
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.counts.values().sum();
        for (node, count) in &self.counts {
            let pct = if total == 0 { 0.0 } else { *count as f64 * 100.0 / total as f64 };
            writeln!(f, "  {:<32} {:>10} {:>7.2}%", node, count, pct)?;
        }
        writeln!(f, "  relative std dev: {:.4}", self.relative_std_dev)
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Lookup { key, nodes } => {
                writeln!(f, "{} -> {}", key, nodes.join(", "))
            }
            CommandResult::Inspect {
                hasher,
                vnodes,
                shares,
                relative_std_dev,
            } => {
                writeln!(f, "hash: {}, vnodes per node: {}", hasher, vnodes)?;
                writeln!(f, "  {:<32} {:>9} {:>8}", "node", "positions", "share")?;
                for share in shares {
                    writeln!(
                        f,
                        "  {:<32} {:>9} {:>7.2}%",
                        share.node,
                        share.positions,
                        share.share * 100.0
                    )?;
                }
                writeln!(f, "  relative std dev: {:.4}", relative_std_dev)
            }
            CommandResult::Simulate {
                keys,
                before,
                change,
                after,
                moved,
            } => {
                writeln!(f, "{} keys", keys)?;
                write!(f, "{}", before)?;
                if let (Some(change), Some(after)) = (change, after) {
                    writeln!(f, "after {}:", change)?;
                    write!(f, "{}", after)?;
                    let pct = if *keys == 0 { 0.0 } else { *moved as f64 * 100.0 / *keys as f64 };
                    writeln!(f, "moved: {} ({:.2}%)", moved, pct)?;
                }
                Ok(())
            }
        }
    }
}
