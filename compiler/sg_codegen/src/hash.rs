//! Content hashing for keys and generated sources.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// A 64-bit content hash, rendered as 16 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentHash(u64);

impl ContentHash {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Format as a fixed-width hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Hash a string with `FxHash`.
#[must_use]
pub fn hash_str(s: &str) -> ContentHash {
    let mut hasher = FxHasher::default();
    s.hash(&mut hasher);
    ContentHash(hasher.finish())
}
