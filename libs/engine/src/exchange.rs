//! Exchange Facade
//!
//! Owns the pool registry, trade ledger, event bus, asset-ledger collaborator
//! and clock, and runs every state-changing operation through one private
//! `transact` step:
//!
//! ```text
//! caller → transact ─┬─ checkpoint asset ledger
//!                    ├─ operation stages pools / trades / events on a Transaction
//!                    ├─ Ok  → commit assets, install pools, append trades, publish events
//!                    └─ Err → roll assets back, discard everything staged
//! ```
//!
//! Operations take `&mut self`, so one exchange processes one operation at a
//! time. Wrap it in a [`SharedExchange`] to serve several threads.

use crate::assets::{AssetLedger, InMemoryAssetLedger};
use crate::clock::{Clock, SystemClock};
use crate::error::ExchangeResult;
use crate::events::EventBus;
use crate::ledger::TradeLedger;
use crate::liquidity::LiquidityManager;
use crate::registry::{Pool, PoolRegistry};
use crate::swap::SwapEngine;
use crate::transaction::Transaction;
use amm::{scaled_to_decimal, Decimal, PRICE_DECIMALS};
use anyhow::{anyhow, Context, Result};
use config::ExchangeConfig;
use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};
use types::{AccountId, ExchangeEvent, TokenId, TradeFilter, TradeRecord, U256};

/// Exchange shared across threads; the mutex serializes operations
pub type SharedExchange<L = InMemoryAssetLedger, C = SystemClock> = Arc<Mutex<Exchange<L, C>>>;

pub struct Exchange<L: AssetLedger = InMemoryAssetLedger, C: Clock = SystemClock> {
    engine_account: AccountId,
    registry: PoolRegistry,
    ledger: TradeLedger,
    events: EventBus,
    assets: L,
    clock: C,
}

impl<L: AssetLedger, C: Clock> Exchange<L, C> {
    /// Exchange custodying pooled tokens in `engine_account` on `assets`
    pub fn new(engine_account: AccountId, assets: L, clock: C) -> Self {
        Self {
            engine_account,
            registry: PoolRegistry::new(),
            ledger: TradeLedger::new(),
            events: EventBus::new(),
            assets,
            clock,
        }
    }

    pub fn into_shared(self) -> SharedExchange<L, C> {
        Arc::new(Mutex::new(self))
    }

    /// Run `operation` atomically
    ///
    /// Either every pool update, trade, event and asset transfer staged by
    /// `operation` becomes visible, or none of them does. A staged pool with
    /// exactly one zero reserve is never committed.
    fn transact<T>(
        &mut self,
        name: &'static str,
        operation: impl FnOnce(&mut Transaction<'_, L>) -> ExchangeResult<T>,
    ) -> ExchangeResult<T> {
        let timestamp = self.clock.now();
        let checkpoint = self.assets.checkpoint();

        let mut tx = Transaction::new(&self.registry, &mut self.assets, self.engine_account, timestamp);
        let outcome = operation(&mut tx);
        let effects = tx.into_effects();
        let outcome = outcome.and_then(|value| effects.check_reserves().map(|_| value));

        match outcome {
            Ok(value) => {
                self.assets.commit(checkpoint);
                for record in effects.pools {
                    self.registry.replace(record);
                }
                for trade in effects.trades {
                    self.ledger.append(trade);
                }
                for event in effects.events {
                    self.events.publish(event);
                }
                Ok(value)
            }
            Err(err) => {
                self.assets.rollback(checkpoint);
                warn!(operation = name, error = %err, "operation rolled back");
                Err(err)
            }
        }
    }

    /// Deposit both tokens of a pair; returns the liquidity units minted
    pub fn add_liquidity(
        &mut self,
        provider: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        amount_a: U256,
        amount_b: U256,
    ) -> ExchangeResult<U256> {
        self.transact("add_liquidity", |tx| {
            LiquidityManager::add_liquidity(tx, provider, token_a, token_b, amount_a, amount_b)
        })
    }

    /// Burn liquidity units; returns amounts paid out in `(token_a, token_b)` order
    pub fn remove_liquidity(
        &mut self,
        provider: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        liquidity: U256,
    ) -> ExchangeResult<(U256, U256)> {
        self.transact("remove_liquidity", |tx| {
            LiquidityManager::remove_liquidity(tx, provider, token_a, token_b, liquidity)
        })
    }

    /// Exact-input swap; returns the amount of `token_out` paid to `trader`
    pub fn swap_tokens(
        &mut self,
        trader: AccountId,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: U256,
    ) -> ExchangeResult<U256> {
        self.transact("swap_tokens", |tx| {
            SwapEngine::swap_tokens(tx, trader, token_in, token_out, amount_in)
        })
    }

    /// Canonical spot price scaled by 10^18
    pub fn get_price(&self, token_a: TokenId, token_b: TokenId) -> ExchangeResult<U256> {
        SwapEngine::get_price(&self.registry, token_a, token_b)
    }

    /// Canonical spot price as a `Decimal`
    pub fn get_price_decimal(&self, token_a: TokenId, token_b: TokenId) -> ExchangeResult<Decimal> {
        let scaled = self.get_price(token_a, token_b)?;
        Ok(scaled_to_decimal(scaled, PRICE_DECIMALS as u32)?)
    }

    /// Output `swap_tokens` would currently produce
    pub fn quote(&self, token_in: TokenId, token_out: TokenId, amount_in: U256) -> ExchangeResult<U256> {
        SwapEngine::quote(&self.registry, token_in, token_out, amount_in)
    }

    pub fn get_pool(&self, token_a: TokenId, token_b: TokenId) -> Pool {
        self.registry.get_pool(token_a, token_b)
    }

    pub fn total_liquidity(&self, token_a: TokenId, token_b: TokenId) -> U256 {
        self.registry.total_liquidity(token_a, token_b)
    }

    pub fn pools(&self) -> impl Iterator<Item = &Pool> {
        self.registry.pools()
    }

    pub fn pool_count(&self) -> usize {
        self.registry.len()
    }

    /// The `index`-th trade of `trader`, oldest first
    pub fn trade(&self, trader: AccountId, index: usize) -> Option<TradeRecord> {
        self.ledger.get(trader, index).cloned()
    }

    pub fn trade_count(&self, trader: AccountId) -> usize {
        self.ledger.count(trader)
    }

    /// Filtered, paginated trade history of one trader
    #[allow(clippy::too_many_arguments)]
    pub fn query_trades(
        &self,
        trader: AccountId,
        token_in: TokenId,
        token_out: TokenId,
        from_ts: u64,
        to_ts: u64,
        limit: usize,
        offset: usize,
    ) -> Vec<TradeRecord> {
        self.ledger.query(&TradeFilter {
            trader,
            token_in,
            token_out,
            from_ts,
            to_ts,
            limit,
            offset,
        })
    }

    /// Trade history query; a zero trader scans every trader
    pub fn query_all(&self, filter: &TradeFilter) -> Vec<TradeRecord> {
        self.ledger.query(filter)
    }

    pub fn events(&self) -> &[ExchangeEvent] {
        self.events.journal()
    }

    pub fn subscribe(&mut self) -> Receiver<ExchangeEvent> {
        self.events.subscribe()
    }

    pub fn engine_account(&self) -> AccountId {
        self.engine_account
    }

    pub fn assets(&self) -> &L {
        &self.assets
    }

    /// Direct collaborator access, e.g. to grant allowances
    pub fn assets_mut(&mut self) -> &mut L {
        &mut self.assets
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> Exchange<InMemoryAssetLedger, C> {
    /// Exchange over an in-memory asset ledger seeded from `config`
    pub fn from_config_with_clock(config: &ExchangeConfig, clock: C) -> Result<Self> {
        let engine_account: AccountId = config
            .engine
            .account
            .parse()
            .with_context(|| format!("Invalid engine account '{}'", config.engine.account))?;

        let mut assets = InMemoryAssetLedger::new();
        for (i, entry) in config.genesis.iter().enumerate() {
            let token: TokenId = entry
                .token
                .parse()
                .with_context(|| format!("Invalid token in genesis[{}]", i))?;
            let account: AccountId = entry
                .account
                .parse()
                .with_context(|| format!("Invalid account in genesis[{}]", i))?;
            let amount = U256::from_dec_str(entry.amount.trim()).map_err(|e| {
                anyhow!("Invalid amount '{}' in genesis[{}]: {:?}", entry.amount, i, e)
            })?;

            assets
                .mint(token, account, amount)
                .with_context(|| format!("Failed to mint genesis[{}]", i))?;
        }

        info!(
            engine_account = %engine_account,
            genesis_entries = config.genesis.len(),
            "exchange initialised"
        );
        Ok(Self::new(engine_account, assets, clock))
    }
}

impl Exchange<InMemoryAssetLedger, SystemClock> {
    /// Exchange over an in-memory asset ledger seeded from `config`, on wall-clock time
    pub fn from_config(config: &ExchangeConfig) -> Result<Self> {
        Self::from_config_with_clock(config, SystemClock)
    }
}
