//! Command-line configuration.

use crate::commands::Command;
use anyhow::{bail, Context, Result};
use clap::Parser;
use corelib::{ConsistentHash, HashAlgorithm, RingConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser, Clone)]
#[command(name = "ringctl", version, about = "Inspect and exercise a consistent hash ring.")]
pub struct CliConfig {
    /// Ring members, comma separated.
    #[arg(long, env = "RINGCTL_NODES", value_delimiter = ',', global = true)]
    pub nodes: Vec<String>,

    /// Virtual points per node (overrides the config file).
    #[arg(long, global = true)]
    pub vnodes: Option<u32>,

    /// Hash function: xxh3 or sip13 (overrides the config file).
    #[arg(long, global = true)]
    pub hash: Option<HashAlgorithm>,

    /// JSON file with a ring configuration.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Resolves the ring configuration: file first, then flags on top.
    pub fn ring_config(&self) -> Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_file(path)?,
            None => RingConfig::default(),
        };
        if let Some(vnodes) = self.vnodes {
            config.vnodes_per_node = vnodes;
        }
        if let Some(hash) = self.hash {
            config.hash = hash;
        }
        config.validate().context("invalid ring configuration")?;
        Ok(config)
    }

    /// Builds a ring holding every `--nodes` member.
    pub fn build_ring(&self) -> Result<ConsistentHash<String>> {
        let members: Vec<String> = self
            .nodes
            .iter()
            .map(|node| node.trim().to_string())
            .filter(|node| !node.is_empty())
            .collect();
        if members.is_empty() {
            bail!("no ring members given; pass --nodes or set RINGCTL_NODES");
        }

        let ring = ConsistentHash::from_config(&self.ring_config()?)?;
        ring.add_nodes(members);
        tracing::info!(
            nodes = ring.node_count(),
            vnodes = ring.vnodes_per_node(),
            hash = ring.hasher_name(),
            "ring built"
        );
        Ok(ring)
    }

    pub fn run(self) -> Result<()> {
        init_tracing(&self.log_level);
        let ring = self.build_ring()?;
        let result = self.command.execute(&ring)?;
        print!("{}", result);
        Ok(())
    }
}

fn load_config_file(path: &Path) -> Result<RingConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}
