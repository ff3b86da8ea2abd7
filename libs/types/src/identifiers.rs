//! Typed Identifiers for Tokens and Accounts
//!
//! Zero-cost wrappers around 20-byte addresses. Tokens and accounts share the
//! same underlying representation but are distinct types so a token can never
//! be passed where a trader is expected.
//!
//! ## Ordering
//!
//! Identifiers order by their big-endian bytes, which is the same as comparing
//! them as unsigned integers. Pool canonicalization depends on this.
//!
//! ## Sentinel
//!
//! The all-zero identifier is reserved: trade history filters treat it as
//! "match any".

use ethereum_types::H160;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while parsing an identifier from text
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseIdError {
    #[error("Invalid hex identifier '{input}': {reason}")]
    InvalidHex { input: String, reason: String },

    #[error("Identifier '{input}' must be 20 bytes, got {len}")]
    WrongLength { input: String, len: usize },
}

/// Macro for generating typed address wrappers
///
/// Each generated type wraps an `H160`, orders as an unsigned integer and
/// renders as a full `0x`-prefixed lowercase hex string.
macro_rules! define_address_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            Serialize,
            Deserialize
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(pub H160);

        impl $name {
            /// The reserved all-zero identifier
            pub const ZERO: Self = Self(H160([0u8; 20]));

            #[inline(always)]
            pub const fn new(inner: H160) -> Self {
                Self(inner)
            }

            #[inline(always)]
            pub const fn into_inner(self) -> H160 {
                self.0
            }

            #[inline(always)]
            pub fn as_bytes(&self) -> &[u8] {
                self.0.as_bytes()
            }

            #[inline(always)]
            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }

            /// Build an identifier whose low 8 bytes hold `value` (big-endian)
            pub fn from_low_u64_be(value: u64) -> Self {
                Self(H160::from_low_u64_be(value))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "0x{}", hex::encode(self.0.as_bytes()))
            }
        }

        impl From<H160> for $name {
            #[inline(always)]
            fn from(inner: H160) -> Self {
                Self(inner)
            }
        }

        impl From<$name> for H160 {
            #[inline(always)]
            fn from(id: $name) -> H160 {
                id.0
            }
        }

        impl From<[u8; 20]> for $name {
            #[inline(always)]
            fn from(bytes: [u8; 20]) -> Self {
                Self(H160(bytes))
            }
        }

        impl FromStr for $name {
            type Err = ParseIdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))
                    .unwrap_or(trimmed);
                let bytes = hex::decode(digits).map_err(|e| ParseIdError::InvalidHex {
                    input: s.to_string(),
                    reason: e.to_string(),
                })?;
                if bytes.len() != 20 {
                    return Err(ParseIdError::WrongLength {
                        input: s.to_string(),
                        len: bytes.len(),
                    });
                }
                Ok(Self(H160::from_slice(&bytes)))
            }
        }
    };
}

define_address_id!(
    /// Fungible token identifier (the token contract address)
    TokenId
);

define_address_id!(
    /// Account identifier: a trader, liquidity provider or the engine itself
    AccountId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_unsigned() {
        let small = TokenId::from_low_u64_be(1);
        let large = TokenId::from_low_u64_be(256);
        assert!(small < large);

        let mut high_byte = [0u8; 20];
        high_byte[0] = 1;
        assert!(TokenId::from(high_byte) > large);
    }

    #[test]
    fn test_parse_and_display() {
        let id: AccountId = "0x00000000000000000000000000000000000000ff".parse().unwrap();
        assert_eq!(id, AccountId::from_low_u64_be(255));
        assert_eq!(id.to_string(), "0x00000000000000000000000000000000000000ff");

        let bare: AccountId = "00000000000000000000000000000000000000ff".parse().unwrap();
        assert_eq!(bare, id);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            "0x1234".parse::<TokenId>(),
            Err(ParseIdError::WrongLength { len: 2, .. })
        ));
        assert!(matches!(
            "0xzz".parse::<TokenId>(),
            Err(ParseIdError::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_zero_sentinel() {
        assert!(TokenId::ZERO.is_zero());
        assert_eq!(TokenId::default(), TokenId::ZERO);
        assert!(!TokenId::from_low_u64_be(7).is_zero());
    }
}
