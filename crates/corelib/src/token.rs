//! Ring positions.
//!
//! A token is a position in the 64-bit hash space. The space is circular:
//! the successor of `u64::MAX` is `0`.

use std::fmt;

/// A position on the hash ring.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Token(pub u64);

impl Token {
    /// Minimum token value (start of ring).
    pub const MIN: Token = Token(0);
    /// Maximum token value (end of ring).
    pub const MAX: Token = Token(u64::MAX);

    #[inline]
    pub fn value(self) -> u64 {
        self.0
    }

    /// Clockwise distance from `self` to `other` on the ring.
    ///
    /// The distance from a token to itself is zero.
    #[inline]
    pub fn distance_to(self, other: Token) -> u64 {
        other.0.wrapping_sub(self.0)
    }
}

impl From<u64> for Token {
    fn from(value: u64) -> Self {
        Token(value)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
