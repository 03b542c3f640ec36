//! Core library for consistent hashing implementation.
//!
//! This crate provides the fundamental abstractions for consistent hashing:
//! - Pluggable hash functions
//! - Tokens and virtual nodes
//! - The ordered hash ring
//! - The `ConsistentHash` facade with lock-free lookups
//! - Ownership statistics over ring snapshots

pub mod config;
pub mod consistent;
pub mod error;
pub mod hash;
pub mod node;
pub mod ring;
pub mod token;
pub mod topology;
pub mod vnode;

pub use config::{RingConfig, DEFAULT_VNODES};
pub use consistent::{ConsistentHash, ConsistentHashBuilder, MembershipDiff};
pub use error::{Error, Result};
pub use hash::{HashAlgorithm, HashFunction, SipHash13, Xxh3Hash};
pub use node::{Node, NodeId, RingNode};
pub use ring::HashRing;
pub use token::Token;
pub use topology::Ownership;
pub use vnode::VirtualNode;
