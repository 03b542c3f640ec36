//! Core hash function trait definitions.

use std::io::Write;

/// A hash function maps bytes onto the 64-bit token space of the ring.
///
/// Hash functions are stateless and thread-safe, allowing concurrent
/// lookups without synchronization overhead. Implementations must be
/// deterministic across process restarts: two cluster members hashing the
/// same key must agree on its position.
pub trait HashFunction: Send + Sync + 'static {
    /// Hashes a key (or any byte sequence) to a ring position.
    fn hash(&self, bytes: &[u8]) -> u64;

    /// Hashes the `replica`-th virtual point of a node.
    ///
    /// The default hashes `"<node_key>:<replica>"`, so implementations only
    /// need to provide [`HashFunction::hash`].
    fn hash_point(&self, node_key: &[u8], replica: u32) -> u64 {
        let mut buf = Vec::with_capacity(node_key.len() + 11);
        buf.extend_from_slice(node_key);
        // Writing into a Vec cannot fail.
        let _ = write!(buf, ":{}", replica);
        self.hash(&buf)
    }

    /// Returns the name of this hash function.
    fn name(&self) -> &'static str;
}
