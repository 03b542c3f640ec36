//! Consistent hash ring implementation.
//!
//! The ring manages token positions and provides efficient lookup
//! operations for finding nodes responsible for keys.

pub mod ring;
mod slot;

pub use ring::HashRing;
