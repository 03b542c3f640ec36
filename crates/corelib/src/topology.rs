//! Ownership statistics over a ring snapshot.
//!
//! Each position owns the clockwise range `(previous position, position]`,
//! so a node's share is the sum of the ranges ending at its active points.

use crate::node::RingNode;
use crate::ring::HashRing;
use std::collections::HashMap;

/// Size of the token space, 2^64.
const RING_SIZE: f64 = 18_446_744_073_709_551_616.0;

/// One node's slice of the ring.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeShare<N> {
    pub node: N,
    /// Positions where this node is the active owner.
    pub positions: usize,
    /// Fraction of the token space owned, in `[0, 1]`.
    pub share: f64,
}

/// Per-node ownership of a ring, largest share first.
#[derive(Clone, Debug)]
pub struct Ownership<N> {
    shares: Vec<NodeShare<N>>,
}

impl<N: RingNode> Ownership<N> {
    /// Computes ownership for every node of `ring`.
    ///
    /// Nodes whose points are all shadowed by collisions appear with a zero
    /// share.
    pub fn of(ring: &HashRing<N>) -> Self {
        let mut owned: HashMap<&N, (usize, u128)> =
            ring.nodes().map(|node| (node, (0, 0))).collect();

        let points: Vec<_> = ring.points().collect();
        if let Some(last) = points.last() {
            let mut prev = last.token;
            for point in &points {
                let range = if points.len() == 1 {
                    1u128 << 64
                } else {
                    u128::from(prev.distance_to(point.token))
                };
                let entry = owned.entry(point.node).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += range;
                prev = point.token;
            }
        }

        let mut shares: Vec<NodeShare<N>> = owned
            .into_iter()
            .map(|(node, (positions, range))| NodeShare {
                node: node.clone(),
                positions,
                share: range as f64 / RING_SIZE,
            })
            .collect();
        shares.sort_by(|a, b| b.share.total_cmp(&a.share));
        Self { shares }
    }

    pub fn shares(&self) -> &[NodeShare<N>] {
        &self.shares
    }

    pub fn share_of(&self, node: &N) -> Option<f64> {
        self.shares
            .iter()
            .find(|entry| &entry.node == node)
            .map(|entry| entry.share)
    }

    /// Standard deviation of the shares divided by the mean share.
    ///
    /// 0.0 for a perfectly balanced (or empty) ring.
    pub fn relative_std_dev(&self) -> f64 {
        relative_std_dev(self.shares.iter().map(|entry| entry.share))
    }
}

/// Relative standard deviation (coefficient of variation) of `values`.
pub fn relative_std_dev<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return 0.0;
    }
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt() / mean
}
