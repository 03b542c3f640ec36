//! Failover placement on top of the consistent hash ring.
//!
//! A placement strategy turns "which nodes own this key" into an ordered
//! failover list: the primary owner first, then the nodes a caller should
//! try when the primary is unavailable.
//!
//! - **SimpleStrategy**: the next distinct nodes clockwise around the ring
//! - **NetworkTopologyStrategy**: like `SimpleStrategy`, but prefers nodes in
//!   racks not yet used

pub mod error;
pub mod placement;
pub mod strategy;

pub use error::PlacementError;
pub use placement::ReplicaPlacement;
pub use strategy::{NetworkTopologyStrategy, PlacementStrategy, SimpleStrategy};
