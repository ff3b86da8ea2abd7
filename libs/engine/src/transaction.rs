//! Staged State Transitions
//!
//! A [`Transaction`] is the only way an operation changes engine state. Pool
//! records are copied and mutated on the side, trades and events are queued,
//! and asset transfers go straight to the collaborator under a checkpoint.
//! The owning [`Exchange`](crate::Exchange) either commits everything the
//! transaction staged or rolls the collaborator back and drops the rest.

use crate::assets::AssetLedger;
use crate::error::{ExchangeError, ExchangeResult};
use crate::registry::{PoolRecord, PoolRegistry};
use std::collections::BTreeMap;
use tracing::{debug, warn};
use types::{canonicalize, AccountId, CanonicalPair, ExchangeEvent, PairKey, TokenId, TradeRecord, U256};

/// Everything a successful transaction hands back for commit
#[derive(Debug, Default)]
pub(crate) struct Effects {
    pub pools: Vec<PoolRecord>,
    pub trades: Vec<TradeRecord>,
    pub events: Vec<ExchangeEvent>,
}

impl Effects {
    /// Every staged pool has both reserves zero or both positive
    pub(crate) fn check_reserves(&self) -> ExchangeResult<()> {
        match self
            .pools
            .iter()
            .find(|record| record.pool.reserve_a.is_zero() != record.pool.reserve_b.is_zero())
        {
            Some(record) => {
                warn!(
                    pair = %record.pool.key,
                    reserve_a = %record.pool.reserve_a,
                    reserve_b = %record.pool.reserve_b,
                    "one-sided pool rejected"
                );
                Err(ExchangeError::InvalidAmount)
            }
            None => Ok(()),
        }
    }
}

pub(crate) struct Transaction<'a, L: AssetLedger> {
    registry: &'a PoolRegistry,
    assets: &'a mut L,
    engine_account: AccountId,
    timestamp: u64,
    staged_pools: BTreeMap<PairKey, PoolRecord>,
    trades: Vec<TradeRecord>,
    events: Vec<ExchangeEvent>,
}

impl<'a, L: AssetLedger> Transaction<'a, L> {
    pub(crate) fn new(
        registry: &'a PoolRegistry,
        assets: &'a mut L,
        engine_account: AccountId,
        timestamp: u64,
    ) -> Self {
        Self {
            registry,
            assets,
            engine_account,
            timestamp,
            staged_pools: BTreeMap::new(),
            trades: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Timestamp shared by every record and event of this transaction
    pub(crate) fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Current view of a pool record, including changes staged so far
    pub(crate) fn record(&self, key: PairKey) -> PoolRecord {
        self.staged_pools
            .get(&key)
            .copied()
            .unwrap_or_else(|| self.registry.record(key))
    }

    /// Exclusive access to one pool for a single state transition
    ///
    /// `f` receives a copy of the pool record for the canonical pair of
    /// `(token_a, token_b)` together with the canonicalization result. The copy
    /// is staged only if `f` succeeds.
    pub(crate) fn mutate_pool<T>(
        &mut self,
        token_a: TokenId,
        token_b: TokenId,
        f: impl FnOnce(&mut PoolRecord, &CanonicalPair) -> ExchangeResult<T>,
    ) -> ExchangeResult<T> {
        let pair = canonicalize(token_a, token_b);
        let mut record = self.record(pair.key);
        let output = f(&mut record, &pair)?;

        debug!(
            pair = %pair.key,
            reserve_a = %record.pool.reserve_a,
            reserve_b = %record.pool.reserve_b,
            total_liquidity = %record.total_liquidity,
            "pool staged"
        );
        self.staged_pools.insert(pair.key, record);
        Ok(output)
    }

    /// Pull `amount` of `token` from `from` into engine custody
    pub(crate) fn pull(&mut self, token: TokenId, from: AccountId, amount: U256) -> ExchangeResult<()> {
        let engine = self.engine_account;
        self.assets
            .transfer_from(token, engine, from, engine, amount)?;
        Ok(())
    }

    /// Pay `amount` of `token` out of engine custody to `to`
    pub(crate) fn push(&mut self, token: TokenId, to: AccountId, amount: U256) -> ExchangeResult<()> {
        let engine = self.engine_account;
        self.assets.transfer(token, engine, to, amount)?;
        Ok(())
    }

    pub(crate) fn record_trade(&mut self, trade: TradeRecord) {
        self.trades.push(trade);
    }

    pub(crate) fn emit(&mut self, event: ExchangeEvent) {
        self.events.push(event);
    }

    pub(crate) fn into_effects(self) -> Effects {
        Effects {
            pools: self.staged_pools.into_values().collect(),
            trades: self.trades,
            events: self.events,
        }
    }
}
