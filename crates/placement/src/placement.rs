//! The result of placing a key.

/// Ordered nodes chosen for a key: the primary first, then fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaPlacement<N> {
    nodes: Vec<N>,
    requested: usize,
}

impl<N> ReplicaPlacement<N> {
    /// `nodes` must be non-empty and free of duplicates.
    pub(crate) fn new(nodes: Vec<N>, requested: usize) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes, requested }
    }

    /// The node owning the key.
    pub fn primary(&self) -> &N {
        &self.nodes[0]
    }

    /// Nodes to try, in order, when the primary is unavailable.
    pub fn fallbacks(&self) -> &[N] {
        &self.nodes[1..]
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when the ring had fewer nodes than the strategy asked for.
    pub fn is_degraded(&self) -> bool {
        self.nodes.len() < self.requested
    }

    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_and_fallbacks() {
        let placement = ReplicaPlacement::new(vec!["a", "b", "c"], 3);
        assert_eq!(*placement.primary(), "a");
        assert_eq!(placement.fallbacks(), &["b", "c"]);
        assert!(!placement.is_degraded());
    }

    #[test]
    fn test_degraded() {
        let placement = ReplicaPlacement::new(vec!["a"], 3);
        assert!(placement.fallbacks().is_empty());
        assert!(placement.is_degraded());
    }
}
