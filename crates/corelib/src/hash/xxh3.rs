//! XXH3 hash function (the default).

use crate::hash::traits::HashFunction;
use xxhash_rust::xxh3::xxh3_64;

/// Unseeded XXH3 64-bit hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xxh3Hash;

impl HashFunction for Xxh3Hash {
    #[inline]
    fn hash(&self, bytes: &[u8]) -> u64 {
        xxh3_64(bytes)
    }

    fn name(&self) -> &'static str {
        "xxh3"
    }
}
