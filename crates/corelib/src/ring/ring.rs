//! Hash ring data structure.
//!
//! A `BTreeMap<Token, Slot>` ordered by position plus a per-node index of the
//! tokens each node owns, so removal touches only that node's points.

use crate::hash::HashFunction;
use crate::node::RingNode;
use crate::ring::slot::Slot;
use crate::token::Token;
use crate::vnode::VirtualNode;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Ordered mapping from ring position to owning node.
///
/// `HashRing` is a plain single-threaded value. [`crate::ConsistentHash`]
/// wraps it to provide lock-free reads: writers clone the current ring,
/// mutate the clone and publish it, so a published ring is never mutated.
///
/// # Collisions
///
/// Points of different nodes that hash to the same token share a slot. The
/// owner with the smallest `ring_key` is active and answers lookups; the
/// others are shadowed until it leaves. The outcome does not depend on the
/// order in which nodes joined.
#[derive(Clone)]
pub struct HashRing<N: RingNode> {
    hasher: Arc<dyn HashFunction>,
    slots: BTreeMap<Token, Slot<N>>,
    members: HashMap<N, Vec<Token>>,
}

impl<N: RingNode> HashRing<N> {
    /// Creates an empty ring that places points with `hasher`.
    pub fn new(hasher: Arc<dyn HashFunction>) -> Self {
        Self {
            hasher,
            slots: BTreeMap::new(),
            members: HashMap::new(),
        }
    }

    /// Inserts `count` virtual points for `node`.
    ///
    /// A node that is already present is removed first, so repeating the
    /// call is a no-op and calling it with a different `count` re-weights
    /// the node. A `count` of zero leaves the node absent.
    pub fn add_points(&mut self, node: N, count: u32) {
        self.remove_points(&node);
        if count == 0 {
            return;
        }

        let ring_key = node.ring_key().into_owned();
        let mut tokens = Vec::with_capacity(count as usize);
        for replica in 0..count {
            let token = Token(self.hasher.hash_point(&ring_key, replica));
            match self.slots.entry(token) {
                Entry::Vacant(entry) => {
                    entry.insert(Slot::new(node.clone()));
                    tokens.push(token);
                }
                Entry::Occupied(mut entry) => {
                    if entry.get_mut().insert(node.clone(), &ring_key) {
                        tracing::warn!(%token, replica, "virtual point collides with another node");
                        tokens.push(token);
                    }
                }
            }
        }
        self.members.insert(node, tokens);
    }

    /// Removes every virtual point owned by `node`.
    ///
    /// Returns whether the node was present. Removing an absent node is a
    /// no-op.
    pub fn remove_points(&mut self, node: &N) -> bool {
        let Some(tokens) = self.members.remove(node) else {
            return false;
        };
        for token in tokens {
            if let Entry::Occupied(mut entry) = self.slots.entry(token) {
                entry.get_mut().remove(node);
                if entry.get().is_empty() {
                    entry.remove();
                }
            }
        }
        true
    }

    /// Returns the first point at or after `token`, wrapping around to the
    /// smallest position. `None` if the ring is empty.
    pub fn successor(&self, token: Token) -> Option<VirtualNode<&N>> {
        self.slots
            .range(token..)
            .next()
            .or_else(|| self.slots.iter().next())
            .map(|(token, slot)| VirtualNode::new(*token, slot.active()))
    }

    /// Walks clockwise from `successor(token)` collecting distinct nodes.
    ///
    /// Each position is visited at most once, wraparound included. Within a
    /// position the active owner comes before shadowed ones. Stops after
    /// `limit` nodes or a full turn, whichever comes first.
    pub fn distinct_nodes_from(&self, token: Token, limit: usize) -> Vec<N> {
        let limit = limit.min(self.members.len());
        if limit == 0 {
            return Vec::new();
        }

        let mut found = Vec::with_capacity(limit);
        let mut seen = HashSet::with_capacity(limit);
        let walk = self.slots.range(token..).chain(self.slots.range(..token));
        for (_, slot) in walk {
            for owner in slot.owners() {
                if seen.insert(owner) {
                    found.push(owner.clone());
                    if found.len() == limit {
                        return found;
                    }
                }
            }
        }
        found
    }

    /// Position of `key` on this ring.
    #[inline]
    pub fn token_for(&self, key: &[u8]) -> Token {
        Token(self.hasher.hash(key))
    }

    /// The node owning `key`, or `None` if the ring is empty.
    pub fn locate(&self, key: &[u8]) -> Option<&N> {
        self.successor(self.token_for(key)).map(|vnode| vnode.node)
    }

    /// Up to `count` distinct nodes for `key`, in ring order.
    pub fn locate_n(&self, key: &[u8], count: usize) -> Vec<N> {
        self.distinct_nodes_from(self.token_for(key), count)
    }

    /// Number of physical nodes.
    pub fn node_count(&self) -> usize {
        self.members.len()
    }

    /// Number of virtual points across all nodes, shadowed ones included.
    pub fn point_count(&self) -> usize {
        self.members.values().map(Vec::len).sum()
    }

    /// Number of occupied positions.
    pub fn position_count(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, node: &N) -> bool {
        self.members.contains_key(node)
    }

    /// All physical nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.members.keys()
    }

    /// Tokens owned by `node`, in replica order.
    pub fn points_of(&self, node: &N) -> Option<&[Token]> {
        self.members.get(node).map(Vec::as_slice)
    }

    /// Occupied positions in ring order with their active owner.
    pub fn points(&self) -> impl Iterator<Item = VirtualNode<&N>> + '_ {
        self.slots
            .iter()
            .map(|(token, slot)| VirtualNode::new(*token, slot.active()))
    }

    pub fn hasher(&self) -> &Arc<dyn HashFunction> {
        &self.hasher
    }

    pub fn hasher_name(&self) -> &'static str {
        self.hasher.name()
    }
}

impl<N: RingNode + fmt::Debug> fmt::Debug for HashRing<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashRing")
            .field("hasher", &self.hasher.name())
            .field("nodes", &self.members.len())
            .field("positions", &self.slots.len())
            .finish()
    }
}
