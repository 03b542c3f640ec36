//! CLI tool for exercising consistent hash rings.
//!
//! Provides commands for:
//! - Looking up the owner (and failover nodes) of a key
//! - Inspecting per-node ownership of the ring
//! - Simulating key movement when nodes join or leave

pub mod commands;
pub mod config;

pub use commands::{Command, CommandResult};
pub use config::CliConfig;
