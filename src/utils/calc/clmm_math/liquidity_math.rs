//! Liquidity <-> token-amount deltas over a sqrt-price interval.
//!
//! All prices are Q64.64 sqrt prices. Functions accept the interval bounds
//! in either order and normalize internally; rounding direction is chosen
//! by the caller (`round_up = true` when charging a depositor, `false`
//! when paying out).

use super::big_num::U256;
use super::fixed_point_64;
use super::full_math::{div_ceil_u256, MulDiv};
use super::MathError;

/// Token-0 amount needed to move liquidity across `[sqrt_a, sqrt_b]`.
///
/// `amount_0 = liquidity * (sqrt_b - sqrt_a) / (sqrt_a * sqrt_b)` in Q64.64.
pub fn get_delta_amount_0_unsigned(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, MathError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }
    if sqrt_ratio_a_x64 == 0 {
        return Err(MathError::DivisionByZero);
    }

    let numerator_1 = U256::from(liquidity) << fixed_point_64::RESOLUTION;
    let numerator_2 = U256::from(sqrt_ratio_b_x64 - sqrt_ratio_a_x64);

    let result = if round_up {
        let divided = numerator_1
            .mul_div_ceil(numerator_2, U256::from(sqrt_ratio_b_x64))
            .ok_or(MathError::AmountOverflow)?;
        div_ceil_u256(divided, U256::from(sqrt_ratio_a_x64))
    } else {
        numerator_1
            .mul_div_floor(numerator_2, U256::from(sqrt_ratio_b_x64))
            .ok_or(MathError::AmountOverflow)?
            / U256::from(sqrt_ratio_a_x64)
    };

    if result > U256::from(u64::MAX) {
        return Err(MathError::AmountOverflow);
    }
    Ok(result.as_u64())
}

/// Token-1 amount needed to move liquidity across `[sqrt_a, sqrt_b]`.
///
/// `amount_1 = liquidity * (sqrt_b - sqrt_a)` in Q64.64.
pub fn get_delta_amount_1_unsigned(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, MathError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }

    let liquidity = U256::from(liquidity);
    let diff = U256::from(sqrt_ratio_b_x64 - sqrt_ratio_a_x64);
    let q64 = U256::from(fixed_point_64::Q64);

    let result = if round_up {
        liquidity.mul_div_ceil(diff, q64)
    } else {
        liquidity.mul_div_floor(diff, q64)
    }
    .ok_or(MathError::AmountOverflow)?;

    if result > U256::from(u64::MAX) {
        return Err(MathError::AmountOverflow);
    }
    Ok(result.as_u64())
}

/// Maximum liquidity purchasable with `amount_0` over `[sqrt_a, sqrt_b]`.
pub fn get_liquidity_from_amount_0(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    amount_0: u64,
) -> Result<u128, MathError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }
    let diff = sqrt_ratio_b_x64 - sqrt_ratio_a_x64;
    if diff == 0 {
        return Err(MathError::DivisionByZero);
    }

    // intermediate = sqrt_a * sqrt_b / Q64
    let intermediate = U256::from(sqrt_ratio_a_x64)
        .mul_div_floor(
            U256::from(sqrt_ratio_b_x64),
            U256::from(fixed_point_64::Q64),
        )
        .ok_or(MathError::AmountOverflow)?;

    let liquidity = U256::from(amount_0)
        .mul_div_floor(intermediate, U256::from(diff))
        .ok_or(MathError::AmountOverflow)?;
    if liquidity > U256::from(u128::MAX) {
        return Err(MathError::AmountOverflow);
    }
    Ok(liquidity.as_u128())
}

/// Maximum liquidity purchasable with `amount_1` over `[sqrt_a, sqrt_b]`.
pub fn get_liquidity_from_amount_1(
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    amount_1: u64,
) -> Result<u128, MathError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }
    let diff = sqrt_ratio_b_x64 - sqrt_ratio_a_x64;
    if diff == 0 {
        return Err(MathError::DivisionByZero);
    }

    let liquidity = U256::from(amount_1)
        .mul_div_floor(U256::from(fixed_point_64::Q64), U256::from(diff))
        .ok_or(MathError::AmountOverflow)?;
    if liquidity > U256::from(u128::MAX) {
        return Err(MathError::AmountOverflow);
    }
    Ok(liquidity.as_u128())
}

/// Maximum liquidity both amounts can fund together, given the current
/// pool price. Outside the range only one side is needed; inside, the
/// smaller of the two single-sided results wins.
pub fn get_liquidity_from_amounts(
    sqrt_ratio_current_x64: u128,
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    amount_0: u64,
    amount_1: u64,
) -> Result<u128, MathError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }

    if sqrt_ratio_current_x64 <= sqrt_ratio_a_x64 {
        get_liquidity_from_amount_0(sqrt_ratio_a_x64, sqrt_ratio_b_x64, amount_0)
    } else if sqrt_ratio_current_x64 < sqrt_ratio_b_x64 {
        let liquidity_0 =
            get_liquidity_from_amount_0(sqrt_ratio_current_x64, sqrt_ratio_b_x64, amount_0)?;
        let liquidity_1 =
            get_liquidity_from_amount_1(sqrt_ratio_a_x64, sqrt_ratio_current_x64, amount_1)?;
        Ok(liquidity_0.min(liquidity_1))
    } else {
        get_liquidity_from_amount_1(sqrt_ratio_a_x64, sqrt_ratio_b_x64, amount_1)
    }
}

/// Token amounts corresponding to `liquidity` over `[sqrt_a, sqrt_b]` at
/// the current pool price. Returns `(amount_0, amount_1)`.
pub fn get_amounts_from_liquidity(
    sqrt_ratio_current_x64: u128,
    mut sqrt_ratio_a_x64: u128,
    mut sqrt_ratio_b_x64: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<(u64, u64), MathError> {
    if sqrt_ratio_a_x64 > sqrt_ratio_b_x64 {
        std::mem::swap(&mut sqrt_ratio_a_x64, &mut sqrt_ratio_b_x64);
    }

    if sqrt_ratio_current_x64 <= sqrt_ratio_a_x64 {
        let amount_0 =
            get_delta_amount_0_unsigned(sqrt_ratio_a_x64, sqrt_ratio_b_x64, liquidity, round_up)?;
        Ok((amount_0, 0))
    } else if sqrt_ratio_current_x64 < sqrt_ratio_b_x64 {
        let amount_0 = get_delta_amount_0_unsigned(
            sqrt_ratio_current_x64,
            sqrt_ratio_b_x64,
            liquidity,
            round_up,
        )?;
        let amount_1 = get_delta_amount_1_unsigned(
            sqrt_ratio_a_x64,
            sqrt_ratio_current_x64,
            liquidity,
            round_up,
        )?;
        Ok((amount_0, amount_1))
    } else {
        let amount_1 =
            get_delta_amount_1_unsigned(sqrt_ratio_a_x64, sqrt_ratio_b_x64, liquidity, round_up)?;
        Ok((0, amount_1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::calc::clmm_math::fixed_point_64::Q64;

    #[test]
    fn argument_order_does_not_matter() {
        let a = Q64 / 2;
        let b = Q64 * 2;
        let liquidity = 1_000_000u128;

        assert_eq!(
            get_delta_amount_0_unsigned(a, b, liquidity, false).unwrap(),
            get_delta_amount_0_unsigned(b, a, liquidity, false).unwrap()
        );
        assert_eq!(
            get_delta_amount_1_unsigned(a, b, liquidity, true).unwrap(),
            get_delta_amount_1_unsigned(b, a, liquidity, true).unwrap()
        );
    }

    #[test]
    fn amounts_are_single_sided_outside_the_range() {
        let a = Q64;
        let b = Q64 * 2;
        let liquidity = 1_000_000u128;

        let (amount_0, amount_1) =
            get_amounts_from_liquidity(Q64 / 2, a, b, liquidity, false).unwrap();
        assert!(amount_0 > 0);
        assert_eq!(amount_1, 0);

        let (amount_0, amount_1) =
            get_amounts_from_liquidity(Q64 * 4, a, b, liquidity, false).unwrap();
        assert_eq!(amount_0, 0);
        assert!(amount_1 > 0);
    }

    #[test]
    fn liquidity_round_trips_through_amounts() {
        let current = Q64;
        let a = Q64 / 2;
        let b = Q64 * 2;
        let liquidity = 1_000_000u128;

        let (amount_0, amount_1) =
            get_amounts_from_liquidity(current, a, b, liquidity, true).unwrap();
        let recovered =
            get_liquidity_from_amounts(current, a, b, amount_0, amount_1).unwrap();

        // Rounding up on the way out means we can fund at least as much
        // liquidity on the way back.
        assert!(recovered >= liquidity);
        assert!(recovered < liquidity + liquidity / 1_000);
    }

    #[test]
    fn rounding_up_never_shrinks_the_amount() {
        let a = Q64 / 3;
        let b = Q64 * 3;
        let liquidity = 123_456_789u128;
        let floor = get_delta_amount_0_unsigned(a, b, liquidity, false).unwrap();
        let ceil = get_delta_amount_0_unsigned(a, b, liquidity, true).unwrap();
        assert!(ceil >= floor);
        assert!(ceil - floor <= 1);
    }

    #[test]
    fn zero_width_range_is_rejected() {
        assert_eq!(
            get_liquidity_from_amount_0(Q64, Q64, 1_000),
            Err(MathError::DivisionByZero)
        );
    }
}
