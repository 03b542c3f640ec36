//! Simple placement strategy.
//!
//! Places a key on N distinct nodes sequentially around the ring (clockwise
//! from the key's position). This is the simplest strategy and works well
//! for:
//!
//! - Small clusters
//! - Single data center deployments
//! - When network topology doesn't matter
//!
//! # Algorithm
//!
//! 1. Find the primary node (clockwise search from the key's token)
//! 2. Continue clockwise to find N-1 more distinct nodes
//! 3. Return the list (primary first)
//!
//! # Performance
//!
//! - **Time**: O(log p + k) where p = points on the ring, k = points walked
//! - **Space**: O(r) where r = replica count

use crate::error::PlacementError;
use crate::placement::ReplicaPlacement;
use crate::strategy::{check_replica_count, PlacementStrategy};
use corelib::{ConsistentHash, RingNode};

/// Simple placement strategy: N nodes placed sequentially around the ring.
///
/// # Example
///
/// ```rust
/// use corelib::ConsistentHash;
/// use placement::{PlacementStrategy, SimpleStrategy};
///
/// let ring = ConsistentHash::new();
/// ring.add_nodes(["cache-1", "cache-2", "cache-3"]);
///
/// let strategy = SimpleStrategy::new(2).unwrap();
/// let placement = strategy.place(&ring, b"my-key").unwrap();
/// assert_eq!(placement.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    /// Number of nodes per key (including primary).
    replicas: usize,
}

impl SimpleStrategy {
    /// Create a new simple strategy placing each key on `replicas` nodes.
    ///
    /// - 1: primary only, no fallback
    /// - 3: primary + 2 fallbacks
    pub fn new(replicas: usize) -> Result<Self, PlacementError> {
        Ok(Self {
            replicas: check_replica_count(replicas)?,
        })
    }
}

impl Default for SimpleStrategy {
    /// Primary plus two fallbacks.
    fn default() -> Self {
        Self { replicas: 3 }
    }
}

impl<N: RingNode> PlacementStrategy<N> for SimpleStrategy {
    fn replica_count(&self) -> usize {
        self.replicas
    }

    fn place(&self, ring: &ConsistentHash<N>, key: &[u8]) -> Result<ReplicaPlacement<N>, PlacementError> {
        let nodes = ring.get_nodes_for_key(key, self.replicas);
        if nodes.is_empty() {
            return Err(PlacementError::EmptyRing);
        }
        if nodes.len() < self.replicas {
            tracing::debug!(
                requested = self.replicas,
                found = nodes.len(),
                "degraded placement"
            );
        }
        Ok(ReplicaPlacement::new(nodes, self.replicas))
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
