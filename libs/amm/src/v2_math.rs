//! Constant-product (x*y=k) AMM math with exact integer results
//!
//! All quantities are raw token units in `U256`. Intermediate products are
//! formed in 512 bits and every narrowing is checked, so a result is either
//! exact (floor division) or an error, never a wrapped value.

use crate::fixed_point::{checked_mul, integer_sqrt, mul_div, narrow};
use crate::{MathError, MathResult};
use ethereum_types::{U256, U512};
use tracing::trace;

/// Fee-adjusted input multiplier (0.3% fee retained by the pool)
pub const FEE_NUMERATOR: u64 = 997;
pub const FEE_DENOMINATOR: u64 = 1000;

/// Fixed-point scale of spot prices (18 decimals)
pub const PRICE_DECIMALS: usize = 18;

/// Constant-product math functions
pub struct V2Math;

impl V2Math {
    /// Output amount for a swap of `amount_in` against the given reserves
    ///
    /// `amount_in * 997 * reserve_out / (reserve_in * 1000 + amount_in * 997)`,
    /// floored.
    ///
    /// # Errors
    /// - `InvalidInput` when `amount_in` is zero
    /// - `InsufficientLiquidity` when either reserve is zero
    /// - `Overflow` when the numerator exceeds 512 bits
    pub fn get_amount_out(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> MathResult<U256> {
        if amount_in.is_zero() {
            return Err(MathError::InvalidInput);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(MathError::InsufficientLiquidity);
        }

        let amount_in_with_fee = U512::from(amount_in) * U512::from(FEE_NUMERATOR);
        let numerator = amount_in_with_fee
            .checked_mul(U512::from(reserve_out))
            .ok_or(MathError::Overflow)?;
        let denominator = U512::from(reserve_in) * U512::from(FEE_DENOMINATOR) + amount_in_with_fee;

        let amount_out = narrow(numerator / denominator)?;
        trace!(%amount_in, %reserve_in, %reserve_out, %amount_out, "constant-product quote");
        Ok(amount_out)
    }

    /// Output of the same swap with no fee: `amount_in * reserve_out / (reserve_in + amount_in)`
    pub fn get_amount_out_without_fee(
        amount_in: U256,
        reserve_in: U256,
        reserve_out: U256,
    ) -> MathResult<U256> {
        if amount_in.is_zero() {
            return Err(MathError::InvalidInput);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(MathError::InsufficientLiquidity);
        }

        let denominator = U512::from(reserve_in) + U512::from(amount_in);
        narrow(amount_in.full_mul(reserve_out) / denominator)
    }

    /// Liquidity units minted for a deposit: `floor(sqrt(amount_a * amount_b))`
    pub fn liquidity_for_deposit(amount_a: U256, amount_b: U256) -> MathResult<U256> {
        Ok(integer_sqrt(checked_mul(amount_a, amount_b)?))
    }

    /// Geometric total liquidity of a pool: `floor(sqrt(reserve_a * reserve_b))`
    pub fn geometric_liquidity(reserve_a: U256, reserve_b: U256) -> MathResult<U256> {
        Self::liquidity_for_deposit(reserve_a, reserve_b)
    }

    /// Pro-rata share of both reserves for `liquidity` out of `total_liquidity`
    pub fn withdrawal_amounts(
        reserve_a: U256,
        reserve_b: U256,
        liquidity: U256,
        total_liquidity: U256,
    ) -> MathResult<(U256, U256)> {
        let amount_a = mul_div(reserve_a, liquidity, total_liquidity)?;
        let amount_b = mul_div(reserve_b, liquidity, total_liquidity)?;
        Ok((amount_a, amount_b))
    }

    /// Spot price of the base token in quote units, scaled by 10^18
    ///
    /// `reserve_quote * 10^18 / reserve_base`
    pub fn spot_price(reserve_base: U256, reserve_quote: U256) -> MathResult<U256> {
        if reserve_base.is_zero() || reserve_quote.is_zero() {
            return Err(MathError::InsufficientLiquidity);
        }
        mul_div(reserve_quote, U256::exp10(PRICE_DECIMALS), reserve_base)
    }
}
