//! Placement errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The ring has no nodes to place a key on.
    #[error("ring has no nodes")]
    EmptyRing,
    /// A strategy must place at least one node.
    #[error("replica count must be at least 1, got {0}")]
    InvalidReplicaCount(usize),
}
