//! Placement strategy abstractions.
//!
//! Placement strategies determine how many nodes a key is placed on and in
//! which order a caller should try them. Different strategies optimize for
//! different goals:
//!
//! - **SimpleStrategy**: N nodes taken sequentially around the ring
//! - **NetworkTopologyStrategy**: N nodes spread across racks first

pub mod network_topology;
pub mod simple;

pub use network_topology::NetworkTopologyStrategy;
pub use simple::SimpleStrategy;

use crate::error::PlacementError;
use crate::placement::ReplicaPlacement;
use corelib::{ConsistentHash, RingNode};

/// Trait for placement strategies.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as they may be
/// shared across threads.
pub trait PlacementStrategy<N: RingNode>: Send + Sync + 'static {
    /// Number of nodes this strategy places a key on, primary included.
    fn replica_count(&self) -> usize;

    /// Find the nodes for a given key, primary first.
    ///
    /// Returns fewer than `replica_count` nodes (a degraded placement) when
    /// the ring is too small, and [`PlacementError::EmptyRing`] when it has
    /// no nodes at all.
    fn place(&self, ring: &ConsistentHash<N>, key: &[u8]) -> Result<ReplicaPlacement<N>, PlacementError>;

    /// Get the strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}

pub(crate) fn check_replica_count(replicas: usize) -> Result<usize, PlacementError> {
    if replicas == 0 {
        return Err(PlacementError::InvalidReplicaCount(replicas));
    }
    Ok(replicas)
}
