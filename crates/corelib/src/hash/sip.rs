//! SipHash-1-3 hash function.

use crate::hash::traits::HashFunction;
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// SipHash-1-3 with fixed zero keys.
///
/// The keys are fixed rather than random so positions are stable across
/// processes.
#[derive(Clone, Copy, Debug, Default)]
pub struct SipHash13;

impl HashFunction for SipHash13 {
    fn hash(&self, bytes: &[u8]) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(0, 0);
        hasher.write(bytes);
        hasher.finish()
    }

    fn name(&self) -> &'static str {
        "sip13"
    }
}
