//! # AMM Math Library - Exact Constant-Product Arithmetic
//!
//! ## Purpose
//!
//! Integer math shared by the exchange engine: square roots, overflow-checked
//! products and quotients, and the fee-adjusted constant-product output
//! formula. Every function is pure; none of them touch pool state.
//!
//! ## Precision
//!
//! - **Quantities**: raw `U256` token units, no implicit decimals
//! - **Intermediates**: 512-bit products, checked narrowing back to 256 bits
//! - **Rounding**: floor division everywhere, so rounding error always stays
//!   in the pool
//! - **Fee**: fixed 0.3% (`997 / 1000`) on the input side
//! - **Prices**: scaled by 10^18, convertible to `Decimal` for display

pub mod error;
pub mod fixed_point;
pub mod price;
pub mod v2_math;

pub use error::{MathError, MathResult};
pub use fixed_point::{checked_add, checked_mul, checked_sub, integer_sqrt, mul_div};
pub use price::scaled_to_decimal;
pub use v2_math::{V2Math, FEE_DENOMINATOR, FEE_NUMERATOR, PRICE_DECIMALS};

/// Common types for AMM calculations
pub use ethereum_types::{U256, U512};
pub use rust_decimal::Decimal;
