//! Owners sharing one ring position.

use crate::node::RingNode;

/// All nodes whose virtual points hashed to the same token.
///
/// Never empty while stored in the ring. Owners are kept in ascending
/// `ring_key` order; equal keys keep insertion order. The first owner is the
/// active one, the rest are shadowed until it leaves.
#[derive(Clone, Debug)]
pub(crate) struct Slot<N> {
    owners: Vec<N>,
}

impl<N: RingNode> Slot<N> {
    pub(crate) fn new(node: N) -> Self {
        Self { owners: vec![node] }
    }

    #[inline]
    pub(crate) fn active(&self) -> &N {
        &self.owners[0]
    }

    #[inline]
    pub(crate) fn owners(&self) -> &[N] {
        &self.owners
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    /// Adds `node` to the slot. Returns false if it already owns the slot.
    pub(crate) fn insert(&mut self, node: N, ring_key: &[u8]) -> bool {
        if self.owners.contains(&node) {
            return false;
        }
        let idx = self
            .owners
            .partition_point(|owner| owner.ring_key().as_ref() <= ring_key);
        self.owners.insert(idx, node);
        true
    }

    pub(crate) fn remove(&mut self, node: &N) -> bool {
        match self.owners.iter().position(|owner| owner == node) {
            Some(idx) => {
                self.owners.remove(idx);
                true
            }
            None => false,
        }
    }
}
