//! Node abstractions for the consistent hash ring.
//!
//! The ring is generic over its node type. Anything that can produce stable
//! bytes for placing its virtual points implements [`RingNode`]; plain
//! strings and integers work out of the box, and [`Node`] carries cluster
//! metadata for callers that want it.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A physical node that can be placed on the ring.
///
/// `ring_key` must be stable for the lifetime of the node and identical on
/// every process that shares the ring, since virtual point positions are
/// derived from it. Two nodes that compare equal must return the same key.
pub trait RingNode: Clone + Eq + Hash + Send + Sync + 'static {
    /// Bytes hashed (with a replica index) to place this node's points.
    fn ring_key(&self) -> Cow<'_, [u8]>;
}

impl RingNode for String {
    fn ring_key(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl RingNode for &'static str {
    fn ring_key(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl RingNode for Vec<u8> {
    fn ring_key(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl RingNode for u64 {
    fn ring_key(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.to_string().into_bytes())
    }
}

impl RingNode for u128 {
    fn ring_key(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.to_string().into_bytes())
    }
}

/// Compact identifier for a node in the cluster.
///
/// Newtype over `u128` so comparisons and hashing are very fast while giving
/// plenty of space for uniqueness.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(pub u128);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl RingNode for NodeId {
    fn ring_key(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.to_string().into_bytes())
    }
}

/// Logical node participating in the ring.
///
/// Identity is the `id` alone: two `Node`s with the same id are the same
/// ring member even if their metadata differs. Keep this struct small and
/// cheap to clone; connections and other heavy state belong elsewhere.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    /// Human‑readable name or hostname.
    pub name: String,
    /// Optional data center label.
    pub datacenter: Option<String>,
    /// Optional rack label.
    pub rack: Option<String>,
}

impl Node {
    /// Construct a new node with basic metadata.
    pub fn new(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            datacenter: None,
            rack: None,
        }
    }

    pub fn with_topology(
        id: NodeId,
        name: impl Into<String>,
        datacenter: impl Into<Option<String>>,
        rack: impl Into<Option<String>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            datacenter: datacenter.into(),
            rack: rack.into(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

impl RingNode for Node {
    fn ring_key(&self) -> Cow<'_, [u8]> {
        self.id.ring_key()
    }
}
