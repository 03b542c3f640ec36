//! Virtual node abstractions.
//!
//! # Virtual Nodes (VNodes) Concept
//!
//! Virtual nodes are a technique to improve load distribution in consistent hashing.
//! Instead of each physical node having a single token on the ring, each node has
//! multiple tokens (virtual nodes). This provides:
//!
//! 1. **Better Load Distribution**: More tokens = smoother distribution of keys
//! 2. **Gradual Rebalancing**: When nodes join/leave, only a fraction of keys move
//! 3. **Fault Tolerance**: Failure of one node affects fewer keys (distributed across vnodes)
//!
//! # Performance Characteristics
//!
//! - **Memory**: O(v) where v = number of vnodes per node
//! - **Lookup**: O(log n) where n = total vnodes (not affected by vnode count per node)
//! - **Rebalancing**: O(k/v) keys move when a node joins/leaves (k = total keys, v = vnodes/node)
//!
//! The default of [`crate::DEFAULT_VNODES`] points per node keeps the
//! per-node share within a few percent of the mean from 3 up to 1000 nodes.

use crate::token::Token;
use std::fmt;

/// A virtual node on the hash ring.
///
/// Represents a single token position owned by a physical node. Each physical
/// node has multiple virtual nodes distributed around the ring.
///
/// The ring hands out `VirtualNode<&N>` views that borrow the owner from a
/// ring snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VirtualNode<N> {
    /// Token position on the ring.
    ///
    /// This is the hash of `"<ring_key>:<vnode_index>"`. The token determines
    /// where this vnode sits on the ring and which keys it's responsible for.
    pub token: Token,

    /// The physical node that owns this virtual node.
    pub node: N,
}

impl<N> VirtualNode<N> {
    /// Create a new virtual node.
    #[inline]
    pub fn new(token: Token, node: N) -> Self {
        Self { token, node }
    }

    /// Get the token position.
    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    /// Get the owning node.
    #[inline]
    pub fn node(&self) -> &N {
        &self.node
    }

    /// Calculate the clockwise distance to another virtual node.
    #[inline]
    pub fn distance_to<M>(&self, other: &VirtualNode<M>) -> u64 {
        self.token.distance_to(other.token)
    }
}

impl<N: fmt::Display> fmt::Display for VirtualNode<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VNode(token={}, node={})", self.token, self.node)
    }
}
