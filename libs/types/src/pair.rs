//! Canonical Token Pair Ordering
//!
//! Every pool is keyed by its two tokens with the smaller identifier first, so
//! `(A, B)` and `(B, A)` resolve to the same pool. All code that touches
//! reserves goes through [`canonicalize`] and [`CanonicalPair::align`] rather
//! than comparing identifiers at the call site.

use crate::TokenId;
use serde::{Deserialize, Serialize};

/// Pool key: token pair in canonical order (`low <= high`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey {
    low: TokenId,
    high: TokenId,
}

impl PairKey {
    /// Token with the smaller identifier (reserve A side)
    pub fn low(&self) -> TokenId {
        self.low
    }

    /// Token with the larger identifier (reserve B side)
    pub fn high(&self) -> TokenId {
        self.high
    }

    /// Whether both sides name the same token. Such a key never holds a pool.
    pub fn is_degenerate(&self) -> bool {
        self.low == self.high
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.low, self.high)
    }
}

/// Result of canonicalizing a caller-ordered pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalPair {
    pub key: PairKey,
    /// True when the caller's first token is the canonical high side
    pub swapped: bool,
}

impl CanonicalPair {
    /// Map a pair of values between caller order and canonical order.
    ///
    /// Values given as `(for_first, for_second)` in caller order come back as
    /// `(for_low, for_high)`, and vice versa; the mapping is its own inverse.
    #[inline]
    pub fn align<T>(&self, first: T, second: T) -> (T, T) {
        if self.swapped {
            (second, first)
        } else {
            (first, second)
        }
    }
}

/// Order two tokens by identifier, smaller first
pub fn canonicalize(token_a: TokenId, token_b: TokenId) -> CanonicalPair {
    if token_a <= token_b {
        CanonicalPair {
            key: PairKey {
                low: token_a,
                high: token_b,
            },
            swapped: false,
        }
    } else {
        CanonicalPair {
            key: PairKey {
                low: token_b,
                high: token_a,
            },
            swapped: true,
        }
    }
}
