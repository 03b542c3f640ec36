//! Hash function abstraction for consistent hashing.
//!
//! Hash functions place virtual points on the ring and locate a key's
//! position. Every implementation here is unseeded so that two processes
//! with the same membership build the same ring.

pub mod sip;
pub mod traits;
pub mod xxh3;

pub use sip::SipHash13;
pub use traits::HashFunction;
pub use xxh3::Xxh3Hash;

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Built-in hash functions selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// XXH3 64-bit, the default.
    #[default]
    Xxh3,
    /// SipHash-1-3 with zero keys.
    Sip13,
}

impl HashAlgorithm {
    /// Instantiate the selected hash function.
    pub fn build(self) -> Arc<dyn HashFunction> {
        match self {
            HashAlgorithm::Xxh3 => Arc::new(Xxh3Hash),
            HashAlgorithm::Sip13 => Arc::new(SipHash13),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HashAlgorithm::Xxh3 => "xxh3",
            HashAlgorithm::Sip13 => "sip13",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xxh3" => Ok(HashAlgorithm::Xxh3),
            "sip13" | "siphash13" => Ok(HashAlgorithm::Sip13),
            _ => Err(Error::UnknownHashAlgorithm(s.to_string())),
        }
    }
}

/// The hash function used when the caller does not supply one.
pub fn default_hasher() -> Arc<dyn HashFunction> {
    HashAlgorithm::default().build()
}
