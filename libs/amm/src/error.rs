//! Math error types

use thiserror::Error;

/// Failures from fixed-point and constant-product calculations
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Input amount is zero
    #[error("Invalid input: amount must be positive")]
    InvalidInput,

    /// Pricing against an empty reserve
    #[error("Insufficient liquidity: reserves must be positive")]
    InsufficientLiquidity,

    /// Result or intermediate product does not fit the target width
    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Division by zero")]
    DivisionByZero,
}

pub type MathResult<T> = Result<T, MathError>;
