//! Rack-aware placement strategy.
//!
//! Walks the ring like [`crate::SimpleStrategy`] but skips nodes whose
//! `(datacenter, rack)` is already used, so fallbacks land in different
//! failure domains when the cluster has them. If there are not enough
//! racks, the skipped nodes fill the remaining slots in ring order.

use crate::error::PlacementError;
use crate::placement::ReplicaPlacement;
use crate::strategy::{check_replica_count, PlacementStrategy};
use corelib::{ConsistentHash, Node};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct NetworkTopologyStrategy {
    replicas: usize,
}

impl NetworkTopologyStrategy {
    pub fn new(replicas: usize) -> Result<Self, PlacementError> {
        Ok(Self {
            replicas: check_replica_count(replicas)?,
        })
    }
}

impl PlacementStrategy<Node> for NetworkTopologyStrategy {
    fn replica_count(&self) -> usize {
        self.replicas
    }

    fn place(&self, ring: &ConsistentHash<Node>, key: &[u8]) -> Result<ReplicaPlacement<Node>, PlacementError> {
        let snapshot = ring.snapshot();
        // Every node in ring order; the walk stops early once all are seen.
        let candidates = snapshot.locate_n(key, snapshot.node_count());
        if candidates.is_empty() {
            return Err(PlacementError::EmptyRing);
        }

        let mut racks = HashSet::new();
        let (mut chosen, skipped): (Vec<Node>, Vec<Node>) = candidates
            .into_iter()
            .partition(|node| racks.insert((node.datacenter.clone(), node.rack.clone())));
        chosen.truncate(self.replicas);
        if chosen.len() < self.replicas {
            let missing = self.replicas - chosen.len();
            chosen.extend(skipped.into_iter().take(missing));
        }
        Ok(ReplicaPlacement::new(chosen, self.replicas))
    }

    fn name(&self) -> &'static str {
        "NetworkTopologyStrategy"
    }
}
