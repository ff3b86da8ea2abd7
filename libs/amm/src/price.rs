//! Conversion of scaled integer prices to `Decimal` for display

use crate::{MathError, MathResult};
use ethereum_types::U256;
use rust_decimal::Decimal;

/// Interpret `value` as a fixed-point number with `decimals` fractional digits
///
/// Fails with `Overflow` when the value exceeds the 96-bit `Decimal` mantissa
/// or `decimals` exceeds the `Decimal` scale limit of 28.
pub fn scaled_to_decimal(value: U256, decimals: u32) -> MathResult<Decimal> {
    if value > U256::from(i128::MAX as u128) {
        return Err(MathError::Overflow);
    }
    let mantissa = value.as_u128() as i128;
    Decimal::try_from_i128_with_scale(mantissa, decimals).map_err(|_| MathError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_scaled_price_to_decimal() {
        let two = U256::exp10(18) * U256::from(2u64);
        assert_eq!(scaled_to_decimal(two, 18).unwrap(), dec!(2));

        let half = U256::exp10(17) * U256::from(5u64);
        assert_eq!(scaled_to_decimal(half, 18).unwrap(), dec!(0.5));
    }

    #[test]
    fn test_scaled_price_out_of_range() {
        assert_eq!(scaled_to_decimal(U256::MAX, 18), Err(MathError::Overflow));
        // 2^100 exceeds the 96-bit mantissa
        assert_eq!(
            scaled_to_decimal(U256::one() << 100, 18),
            Err(MathError::Overflow)
        );
    }
}
