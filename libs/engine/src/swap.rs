//! Swap Engine
//!
//! Executes exact-input swaps on the constant-product curve with the fixed
//! 0.3% fee, and answers read-only price and quote requests. There is no
//! minimum-output parameter: callers who need a bound should `quote` first.

use crate::assets::AssetLedger;
use crate::error::{ExchangeError, ExchangeResult};
use crate::registry::PoolRegistry;
use crate::transaction::Transaction;
use amm::{checked_add, checked_sub, V2Math};
use tracing::debug;
use types::{canonicalize, AccountId, ExchangeEvent, TokenId, TradeRecord, U256};

pub(crate) struct SwapEngine;

impl SwapEngine {
    /// Swap `amount_in` of `token_in` for as much `token_out` as the curve gives
    pub(crate) fn swap_tokens<L: AssetLedger>(
        tx: &mut Transaction<'_, L>,
        trader: AccountId,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: U256,
    ) -> ExchangeResult<U256> {
        if token_in == token_out {
            return Err(ExchangeError::IdenticalTokens);
        }
        if amount_in.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }

        let pair = canonicalize(token_in, token_out);
        let current = tx.record(pair.key);
        let (reserve_in, reserve_out) = pair.align(current.pool.reserve_a, current.pool.reserve_b);

        let amount_out = V2Math::get_amount_out(amount_in, reserve_in, reserve_out)?;
        if amount_out.is_zero() {
            return Err(ExchangeError::InsufficientOutput);
        }

        tx.pull(token_in, trader, amount_in)?;
        tx.push(token_out, trader, amount_out)?;

        tx.mutate_pool(token_in, token_out, |record, pair| {
            let (reserve_in, reserve_out) = pair.align(record.pool.reserve_a, record.pool.reserve_b);
            let updated_in = checked_add(reserve_in, amount_in)?;
            let updated_out = checked_sub(reserve_out, amount_out)?;

            let (reserve_a, reserve_b) = pair.align(updated_in, updated_out);
            record.pool.reserve_a = reserve_a;
            record.pool.reserve_b = reserve_b;
            Ok(())
        })?;

        let timestamp = tx.timestamp();
        tx.record_trade(TradeRecord {
            trader,
            token_in,
            token_out,
            amount_in,
            amount_out,
            timestamp,
        });
        tx.emit(ExchangeEvent::TradeExecuted {
            trader,
            token_in,
            token_out,
            amount_in,
            amount_out,
            timestamp,
        });

        debug!(%trader, %token_in, %token_out, %amount_in, %amount_out, "swap staged");
        Ok(amount_out)
    }

    /// Output a swap would produce right now, without executing it
    pub(crate) fn quote(
        registry: &PoolRegistry,
        token_in: TokenId,
        token_out: TokenId,
        amount_in: U256,
    ) -> ExchangeResult<U256> {
        if token_in == token_out {
            return Err(ExchangeError::IdenticalTokens);
        }
        if amount_in.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }

        let pair = canonicalize(token_in, token_out);
        let pool = registry.record(pair.key).pool;
        let (reserve_in, reserve_out) = pair.align(pool.reserve_a, pool.reserve_b);

        let amount_out = V2Math::get_amount_out(amount_in, reserve_in, reserve_out)?;
        if amount_out.is_zero() {
            return Err(ExchangeError::InsufficientOutput);
        }
        Ok(amount_out)
    }

    /// Spot price of the canonical low token in canonical high token units,
    /// scaled by 10^18, whatever order the tokens are passed in
    pub(crate) fn get_price(
        registry: &PoolRegistry,
        token_a: TokenId,
        token_b: TokenId,
    ) -> ExchangeResult<U256> {
        let pool = registry.get_pool(token_a, token_b);
        if pool.is_empty() {
            return Err(ExchangeError::PoolNotFound);
        }
        Ok(V2Math::spot_price(pool.reserve_a, pool.reserve_b)?)
    }
}
