//! Builder for a pre-populated [`ConsistentHash`].

use crate::config::{RingConfig, DEFAULT_VNODES};
use crate::consistent::ConsistentHash;
use crate::error::{Error, Result};
use crate::hash::{default_hasher, HashAlgorithm, HashFunction};
use crate::node::RingNode;
use crate::ring::HashRing;
use std::sync::Arc;

/// Collects settings and initial members, then builds the ring in one
/// snapshot.
///
/// ```
/// use corelib::ConsistentHash;
///
/// let ring = ConsistentHash::builder()
///     .with_vnodes(64)
///     .add_node("node1")
///     .add_node_with_vnodes("node2", 128)
///     .build()
///     .unwrap();
///
/// assert_eq!(ring.node_count(), 2);
/// assert_eq!(ring.snapshot().point_count(), 192);
/// ```
pub struct ConsistentHashBuilder<N: RingNode> {
    vnodes: u32,
    hasher: Option<Arc<dyn HashFunction>>,
    nodes: Vec<(N, Option<u32>)>,
}

impl<N: RingNode> ConsistentHashBuilder<N> {
    pub fn new() -> Self {
        Self {
            vnodes: DEFAULT_VNODES,
            hasher: None,
            nodes: Vec::new(),
        }
    }

    /// Default virtual points per node.
    pub fn with_vnodes(mut self, vnodes: u32) -> Self {
        self.vnodes = vnodes;
        self
    }

    pub fn with_hasher(mut self, hasher: Arc<dyn HashFunction>) -> Self {
        self.hasher = Some(hasher);
        self
    }

    pub fn with_algorithm(self, algorithm: HashAlgorithm) -> Self {
        self.with_hasher(algorithm.build())
    }

    /// Applies both settings from `config`.
    pub fn with_config(self, config: &RingConfig) -> Self {
        self.with_vnodes(config.vnodes_per_node)
            .with_algorithm(config.hash)
    }

    /// Adds a node using the default vnode count.
    pub fn add_node(mut self, node: N) -> Self {
        self.nodes.push((node, None));
        self
    }

    /// Adds a node with its own vnode count (a weight).
    pub fn add_node_with_vnodes(mut self, node: N, vnodes: u32) -> Self {
        self.nodes.push((node, Some(vnodes)));
        self
    }

    /// Builds the ring, failing on a zero vnode count.
    pub fn build(self) -> Result<ConsistentHash<N>> {
        RingConfig::default().with_vnodes(self.vnodes).validate()?;
        if self.nodes.iter().any(|(_, vnodes)| *vnodes == Some(0)) {
            return Err(Error::InvalidNode(
                "explicit vnode count must be at least 1".to_string(),
            ));
        }

        let hash = ConsistentHash::from_parts(
            self.hasher.unwrap_or_else(default_hasher),
            self.vnodes,
        );
        if !self.nodes.is_empty() {
            let _guard = hash.write_lock.lock();
            let mut ring = HashRing::clone(&hash.ring.load());
            for (node, vnodes) in self.nodes {
                ring.add_points(node, vnodes.unwrap_or(self.vnodes));
            }
            hash.publish(ring);
        }
        Ok(hash)
    }
}

impl<N: RingNode> Default for ConsistentHashBuilder<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let ring = ConsistentHashBuilder::new()
            .add_node("a".to_string())
            .add_node("b".to_string())
            .build()
            .unwrap();
        assert_eq!(ring.vnodes_per_node(), DEFAULT_VNODES);
        assert_eq!(ring.snapshot().point_count(), 2 * DEFAULT_VNODES as usize);
    }

    #[test]
    fn test_builder_rejects_zero() {
        let err = ConsistentHashBuilder::<String>::new()
            .with_vnodes(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = ConsistentHashBuilder::new()
            .add_node_with_vnodes("a", 0)
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidNode(_)));
    }

    #[test]
    fn test_builder_with_config() {
        let config = RingConfig::default()
            .with_vnodes(4)
            .with_hash(HashAlgorithm::Sip13);
        let ring = ConsistentHashBuilder::new()
            .with_config(&config)
            .add_node(7u64)
            .build()
            .unwrap();
        assert_eq!(ring.hasher_name(), "sip13");
        assert_eq!(ring.snapshot().point_count(), 4);
    }
}
