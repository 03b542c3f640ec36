//! The `ConsistentHash` facade.
//!
//! Lookups read an immutable [`HashRing`] snapshot without taking a lock.
//! Membership changes are serialized by a per-instance mutex: the writer
//! clones the current snapshot, applies the change and publishes the result
//! with a single atomic swap. Readers already holding the old snapshot finish
//! on it; readers arriving after the swap see the new one.

mod builder;

pub use builder::ConsistentHashBuilder;

use crate::config::{RingConfig, DEFAULT_VNODES};
use crate::error::Result;
use crate::hash::{default_hasher, HashFunction};
use crate::node::RingNode;
use crate::ring::HashRing;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Nodes that joined and left during [`ConsistentHash::replace_nodes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipDiff<N> {
    pub joined: Vec<N>,
    pub left: Vec<N>,
}

impl<N> MembershipDiff<N> {
    pub fn is_empty(&self) -> bool {
        self.joined.is_empty() && self.left.is_empty()
    }
}

/// Consistent hash ring shared between concurrent readers and writers.
///
/// ```
/// use corelib::ConsistentHash;
///
/// let ring = ConsistentHash::new();
/// ring.add_node("cache-1".to_string());
/// ring.add_node("cache-2".to_string());
///
/// let owner = ring.get_node_for_key("user:42").unwrap();
/// let failover = ring.get_nodes_for_key("user:42", 2);
/// assert_eq!(failover[0], owner);
/// ```
pub struct ConsistentHash<N: RingNode> {
    ring: ArcSwap<HashRing<N>>,
    write_lock: Mutex<()>,
    vnodes_per_node: u32,
}

impl<N: RingNode> ConsistentHash<N> {
    /// Creates an empty ring with the default hash function and
    /// [`DEFAULT_VNODES`] points per node.
    pub fn new() -> Self {
        Self::with_hasher(None)
    }

    /// Creates an empty ring using `hasher`, or the default hash function
    /// when `None`.
    pub fn with_hasher(hasher: Option<Arc<dyn HashFunction>>) -> Self {
        Self::from_parts(hasher.unwrap_or_else(default_hasher), DEFAULT_VNODES)
    }

    /// Creates an empty ring from validated configuration.
    pub fn from_config(config: &RingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config.hash.build(), config.vnodes_per_node))
    }

    pub fn builder() -> ConsistentHashBuilder<N> {
        ConsistentHashBuilder::new()
    }

    pub(crate) fn from_parts(hasher: Arc<dyn HashFunction>, vnodes_per_node: u32) -> Self {
        Self {
            ring: ArcSwap::from_pointee(HashRing::new(hasher)),
            write_lock: Mutex::new(()),
            vnodes_per_node,
        }
    }

    // ------------------------------------------------------------------
    // Write path
    // ------------------------------------------------------------------

    /// Registers `node` with the configured number of virtual points.
    ///
    /// Adding a node that is already present leaves the ring unchanged,
    /// including the stored node value. To change metadata that does not
    /// take part in equality (a [`crate::Node`]'s rack, say), call
    /// [`remove_node`](Self::remove_node) and then `add_node`.
    pub fn add_node(&self, node: N) {
        self.add_node_with_vnodes(node, self.vnodes_per_node);
    }

    /// Registers `node` with `count` virtual points, replacing its previous
    /// points if it was already present. A `count` of zero removes the node.
    pub fn add_node_with_vnodes(&self, node: N, count: u32) {
        let _guard = self.write_lock.lock();
        let current = self.ring.load();
        let unchanged = match current.points_of(&node) {
            Some(points) => points.len() == count as usize,
            None => count == 0,
        };
        if unchanged {
            return;
        }

        let mut next = HashRing::clone(&current);
        tracing::debug!(
            node = %String::from_utf8_lossy(&node.ring_key()),
            points = count,
            "adding node to ring"
        );
        next.add_points(node, count);
        self.publish(next);
    }

    /// Registers every node in `nodes`, publishing a single snapshot.
    /// Nodes already present are skipped, as in [`add_node`](Self::add_node).
    pub fn add_nodes<I>(&self, nodes: I)
    where
        I: IntoIterator<Item = N>,
    {
        let _guard = self.write_lock.lock();
        let mut next = HashRing::clone(&self.ring.load());
        let mut added = 0usize;
        for node in nodes {
            if next.contains(&node) {
                continue;
            }
            next.add_points(node, self.vnodes_per_node);
            added += 1;
        }
        if added > 0 {
            tracing::debug!(added, "adding nodes to ring");
            self.publish(next);
        }
    }

    /// Unregisters `node`, returning whether it was present.
    pub fn remove_node(&self, node: &N) -> bool {
        let _guard = self.write_lock.lock();
        let current = self.ring.load();
        if !current.contains(node) {
            return false;
        }

        let mut next = HashRing::clone(&current);
        next.remove_points(node);
        tracing::debug!(
            node = %String::from_utf8_lossy(&node.ring_key()),
            "removed node from ring"
        );
        self.publish(next);
        true
    }

    /// Makes the membership exactly `nodes` in one snapshot.
    ///
    /// Nodes already present keep their points, their weight and their
    /// stored value; absent ones are added with the configured point count.
    pub fn replace_nodes<I>(&self, nodes: I) -> MembershipDiff<N>
    where
        I: IntoIterator<Item = N>,
    {
        let _guard = self.write_lock.lock();
        let current = self.ring.load();
        let desired: HashSet<N> = nodes.into_iter().collect();

        let left: Vec<N> = current
            .nodes()
            .filter(|node| !desired.contains(*node))
            .cloned()
            .collect();
        let joined: Vec<N> = desired
            .into_iter()
            .filter(|node| !current.contains(node))
            .collect();
        let diff = MembershipDiff { joined, left };
        if diff.is_empty() {
            return diff;
        }

        let mut next = HashRing::clone(&current);
        for node in &diff.left {
            next.remove_points(node);
        }
        for node in &diff.joined {
            next.add_points(node.clone(), self.vnodes_per_node);
        }
        tracing::debug!(
            joined = diff.joined.len(),
            left = diff.left.len(),
            "replaced ring membership"
        );
        self.publish(next);
        diff
    }

    /// Must be called with `write_lock` held.
    fn publish(&self, next: HashRing<N>) {
        tracing::trace!(
            nodes = next.node_count(),
            positions = next.position_count(),
            "publishing ring snapshot"
        );
        self.ring.store(Arc::new(next));
    }

    // ------------------------------------------------------------------
    // Read path
    // ------------------------------------------------------------------

    /// The node owning `key`, or `None` if the ring has no nodes.
    pub fn get_node_for_key<K: AsRef<[u8]>>(&self, key: K) -> Option<N> {
        self.ring.load().locate(key.as_ref()).cloned()
    }

    /// Up to `count` distinct nodes for `key` in clockwise ring order,
    /// starting with the owner. Empty if the ring has no nodes.
    pub fn get_nodes_for_key<K: AsRef<[u8]>>(&self, key: K, count: usize) -> Vec<N> {
        self.ring.load().locate_n(key.as_ref(), count)
    }

    /// The current immutable ring.
    pub fn snapshot(&self) -> Arc<HashRing<N>> {
        self.ring.load_full()
    }

    pub fn node_count(&self) -> usize {
        self.ring.load().node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.ring.load().is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.ring.load().contains(node)
    }

    /// All registered nodes, in no particular order.
    pub fn nodes(&self) -> Vec<N> {
        self.ring.load().nodes().cloned().collect()
    }

    pub fn vnodes_per_node(&self) -> u32 {
        self.vnodes_per_node
    }

    pub fn hasher_name(&self) -> &'static str {
        self.ring.load().hasher_name()
    }
}

impl<N: RingNode> Default for ConsistentHash<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: RingNode> fmt::Debug for ConsistentHash<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ring = self.ring.load();
        f.debug_struct("ConsistentHash")
            .field("hasher", &ring.hasher_name())
            .field("vnodes_per_node", &self.vnodes_per_node)
            .field("nodes", &ring.node_count())
            .finish()
    }
}
