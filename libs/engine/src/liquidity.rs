//! Liquidity Manager
//!
//! Deposits and withdrawals against the pool registry. Liquidity units are a
//! pool-level running total only; there is no per-provider share ledger, so a
//! provider cannot later reclaim exactly what they contributed once others
//! have deposited into the same pool.
//!
//! Two notions of "total liquidity" coexist:
//!
//! - the tracked total, incremented by every mint and decremented by every
//!   burn, which bounds how much can be withdrawn
//! - the geometric total `sqrt(reserve_a * reserve_b)`, recomputed from live
//!   reserves and used only to split a withdrawal pro rata
//!
//! They diverge after swaps or unevenly sized deposits. Both are kept as-is.

use crate::assets::AssetLedger;
use crate::error::{ExchangeError, ExchangeResult};
use crate::transaction::Transaction;
use amm::{checked_add, checked_sub, V2Math};
use tracing::debug;
use types::{canonicalize, AccountId, ExchangeEvent, TokenId, U256};

pub(crate) struct LiquidityManager;

impl LiquidityManager {
    /// Deposit `amount_a` of `token_a` and `amount_b` of `token_b`
    ///
    /// Creates the pool on first deposit. Mints `floor(sqrt(amount_a * amount_b))`
    /// liquidity units, computed from this deposit alone, and returns that.
    pub(crate) fn add_liquidity<L: AssetLedger>(
        tx: &mut Transaction<'_, L>,
        provider: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        amount_a: U256,
        amount_b: U256,
    ) -> ExchangeResult<U256> {
        if token_a == token_b {
            return Err(ExchangeError::IdenticalTokens);
        }
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }

        tx.pull(token_a, provider, amount_a)?;
        tx.pull(token_b, provider, amount_b)?;

        let minted = V2Math::liquidity_for_deposit(amount_a, amount_b)?;

        tx.mutate_pool(token_a, token_b, |record, pair| {
            let (deposit_a, deposit_b) = pair.align(amount_a, amount_b);
            record.pool.reserve_a = checked_add(record.pool.reserve_a, deposit_a)?;
            record.pool.reserve_b = checked_add(record.pool.reserve_b, deposit_b)?;
            record.total_liquidity = checked_add(record.total_liquidity, minted)?;
            Ok(())
        })?;

        let timestamp = tx.timestamp();
        tx.emit(ExchangeEvent::LiquidityAdded {
            provider,
            token_a,
            token_b,
            amount_a,
            amount_b,
            timestamp,
        });

        debug!(%provider, %token_a, %token_b, %minted, "liquidity added");
        Ok(minted)
    }

    /// Burn `liquidity` units and pay out the pro-rata reserves
    ///
    /// Returns the withdrawn amounts in the caller's `(token_a, token_b)` order.
    pub(crate) fn remove_liquidity<L: AssetLedger>(
        tx: &mut Transaction<'_, L>,
        provider: AccountId,
        token_a: TokenId,
        token_b: TokenId,
        liquidity: U256,
    ) -> ExchangeResult<(U256, U256)> {
        if liquidity.is_zero() {
            return Err(ExchangeError::InvalidAmount);
        }

        let current = tx.record(canonicalize(token_a, token_b).key);
        if current.total_liquidity < liquidity {
            return Err(ExchangeError::InsufficientLiquidity);
        }
        if current.pool.is_empty() {
            return Err(ExchangeError::EmptyPool);
        }
        if token_a == token_b {
            return Err(ExchangeError::IdenticalTokens);
        }

        let (amount_a, amount_b) = tx.mutate_pool(token_a, token_b, |record, pair| {
            let reserve_a = record.pool.reserve_a;
            let reserve_b = record.pool.reserve_b;

            let geometric_total = V2Math::geometric_liquidity(reserve_a, reserve_b)?;
            let (out_a, out_b) =
                V2Math::withdrawal_amounts(reserve_a, reserve_b, liquidity, geometric_total)?;

            if out_a.is_zero() || out_b.is_zero() {
                return Err(ExchangeError::InvalidAmount);
            }
            // unreachable while the tracked total stays at or below the geometric one
            if out_a > reserve_a || out_b > reserve_b {
                return Err(ExchangeError::InsufficientLiquidity);
            }

            record.pool.reserve_a = reserve_a - out_a;
            record.pool.reserve_b = reserve_b - out_b;
            record.total_liquidity = checked_sub(record.total_liquidity, liquidity)?;

            Ok(pair.align(out_a, out_b))
        })?;

        tx.push(token_a, provider, amount_a)?;
        tx.push(token_b, provider, amount_b)?;

        let timestamp = tx.timestamp();
        tx.emit(ExchangeEvent::LiquidityRemoved {
            provider,
            token_a,
            token_b,
            amount_a,
            amount_b,
            timestamp,
        });

        debug!(%provider, %token_a, %token_b, %liquidity, "liquidity removed");
        Ok((amount_a, amount_b))
    }
}
