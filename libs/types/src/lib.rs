//! # AMM Exchange Types
//!
//! Shared vocabulary for the exchange engine crates:
//!
//! - **Identifiers**: [`TokenId`] and [`AccountId`], 20-byte addresses ordered
//!   as unsigned integers
//! - **Pair keys**: [`canonicalize`] maps any caller-ordered token pair onto the
//!   single [`PairKey`] that identifies its pool
//! - **Trade history**: [`TradeRecord`] and the [`TradeFilter`] query shape
//! - **Events**: [`ExchangeEvent`] published for every committed state change
//!
//! Quantities are `U256` throughout.

pub mod events;
pub mod identifiers;
pub mod pair;
pub mod trade;

pub use ethereum_types::U256;
pub use events::ExchangeEvent;
pub use identifiers::{AccountId, ParseIdError, TokenId};
pub use pair::{canonicalize, CanonicalPair, PairKey};
pub use trade::{TradeFilter, TradeRecord};
