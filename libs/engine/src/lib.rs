//! # AMM Exchange Engine - Constant-Product Pools and Trade History
//!
//! ## Purpose
//!
//! State-transition core of an automated market maker: paired-token liquidity
//! pools priced on the `x * y = k` curve with a fixed 0.3% fee, plus an
//! append-only, queryable per-trader trade ledger.
//!
//! ## Architecture Role
//!
//! ```text
//! caller ─┬─ LiquidityManager ─┐
//!         └─ SwapEngine ───────┼─→ Transaction ─→ PoolRegistry
//!                              │        │        TradeLedger
//!                              │        │        EventBus
//!                              │        └──────→ AssetLedger (external balances)
//!                              └─ amm::V2Math (pure math)
//! ```
//!
//! - **Pool Registry**: reserves and liquidity totals keyed by canonical pair
//! - **Liquidity Manager**: deposits mint `sqrt(a * b)` units, withdrawals pay
//!   out pro rata against the geometric total
//! - **Swap Engine**: exact-input swaps, spot prices and quotes
//! - **Trade Ledger**: filtered, paginated history in insertion order
//! - **Asset Ledger**: token custody is delegated; transfers are journaled so
//!   a failed operation undoes them
//!
//! ## Atomicity
//!
//! Each public operation stages its effects on a transaction and commits
//! them all at once. Any error, including a rejected transfer, leaves pools,
//! history, events and balances exactly as they were.

pub mod assets;
pub mod clock;
pub mod error;
pub mod events;
pub mod exchange;
pub mod ledger;
mod liquidity;
pub mod registry;
mod swap;
mod transaction;

pub use assets::{AssetLedger, InMemoryAssetLedger, LedgerCheckpoint};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{AssetError, ExchangeError, ExchangeResult};
pub use events::EventBus;
pub use exchange::{Exchange, SharedExchange};
pub use ledger::TradeLedger;
pub use registry::{Pool, PoolRecord, PoolRegistry};

pub use types::{
    canonicalize, AccountId, CanonicalPair, ExchangeEvent, PairKey, TokenId, TradeFilter,
    TradeRecord, U256,
};
