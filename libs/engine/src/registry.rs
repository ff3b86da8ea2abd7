//! Pool Registry
//!
//! Arena of pool records keyed by canonical [`PairKey`]. A pool appears the
//! first time liquidity is staged for its pair and stays registered (possibly
//! with zero reserves) from then on.
//!
//! The registry itself is read-only to the rest of the engine; writes arrive
//! as whole records staged by a transaction and replaced on commit.

use std::collections::BTreeMap;
use types::{canonicalize, PairKey, TokenId, U256};

/// Reserves of one pool in canonical order
///
/// Invariant: both reserves are zero (empty pool) or both are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pool {
    pub key: PairKey,
    /// Reserve of the lower-identifier token
    pub reserve_a: U256,
    /// Reserve of the higher-identifier token
    pub reserve_b: U256,
}

impl Pool {
    pub fn empty(key: PairKey) -> Self {
        Self {
            key,
            reserve_a: U256::zero(),
            reserve_b: U256::zero(),
        }
    }

    /// True when either side holds nothing
    pub fn is_empty(&self) -> bool {
        self.reserve_a.is_zero() || self.reserve_b.is_zero()
    }
}

/// Pool reserves plus the running total of minted liquidity units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolRecord {
    pub pool: Pool,
    pub total_liquidity: U256,
}

impl PoolRecord {
    pub fn empty(key: PairKey) -> Self {
        Self {
            pool: Pool::empty(key),
            total_liquidity: U256::zero(),
        }
    }
}

/// Keyed storage of every pool
#[derive(Debug, Default)]
pub struct PoolRegistry {
    pools: BTreeMap<PairKey, PoolRecord>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool for the pair in either argument order; zeroed if never funded
    pub fn get_pool(&self, token_a: TokenId, token_b: TokenId) -> Pool {
        self.record(canonicalize(token_a, token_b).key).pool
    }

    /// Tracked liquidity total for the pair in either argument order
    pub fn total_liquidity(&self, token_a: TokenId, token_b: TokenId) -> U256 {
        self.record(canonicalize(token_a, token_b).key).total_liquidity
    }

    /// Record stored under `key`, or an empty record
    pub fn record(&self, key: PairKey) -> PoolRecord {
        self.pools
            .get(&key)
            .copied()
            .unwrap_or_else(|| PoolRecord::empty(key))
    }

    /// Install a committed record
    pub(crate) fn replace(&mut self, record: PoolRecord) {
        self.pools.insert(record.pool.key, record);
    }

    /// Number of registered pools, including drained ones
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// All registered pools in key order
    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.pools.values().map(|record| &record.pool)
    }
}
