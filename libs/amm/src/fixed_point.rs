//! Integer arithmetic on 256-bit quantities
//!
//! Products of two 256-bit operands are formed in 512 bits so nothing wraps;
//! anything that cannot be narrowed back to 256 bits is an error.

use crate::{MathError, MathResult};
use ethereum_types::{U256, U512};

/// Integer square root, floor of `sqrt(y)`
///
/// Babylonian iteration seeded at `y / 2 + 1`, stopping as soon as the next
/// estimate is not smaller than the current one. Results are bit-for-bit what
/// existing integrations expect, so the iteration must not be swapped for a
/// different square root.
pub fn integer_sqrt(y: U256) -> U256 {
    let two = U256::from(2u64);
    if y > U256::from(3u64) {
        let mut z = y;
        // y / 2 + 1 cannot overflow: y / 2 <= U256::MAX / 2
        let mut x = y / two + U256::one();
        while x < z {
            z = x;
            x = (y / x + x) / two;
        }
        z
    } else if !y.is_zero() {
        U256::one()
    } else {
        U256::zero()
    }
}

/// `a * b` or `Overflow`
#[inline]
pub fn checked_mul(a: U256, b: U256) -> MathResult<U256> {
    a.checked_mul(b).ok_or(MathError::Overflow)
}

/// `a + b` or `Overflow`
#[inline]
pub fn checked_add(a: U256, b: U256) -> MathResult<U256> {
    a.checked_add(b).ok_or(MathError::Overflow)
}

/// `a - b` or `Overflow` when `b > a`
#[inline]
pub fn checked_sub(a: U256, b: U256) -> MathResult<U256> {
    a.checked_sub(b).ok_or(MathError::Overflow)
}

/// Floor of `a * b / denominator` with a 512-bit intermediate product
pub fn mul_div(a: U256, b: U256, denominator: U256) -> MathResult<U256> {
    if denominator.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    let product = a.full_mul(b);
    narrow(product / U512::from(denominator))
}

/// Narrow a 512-bit value back to 256 bits
#[inline]
pub fn narrow(value: U512) -> MathResult<U256> {
    U256::try_from(value).map_err(|_| MathError::Overflow)
}
