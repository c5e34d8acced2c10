//! Deposit and withdrawal sizing for CLMM positions.

use anyhow::Result;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};

use crate::sdk::engine::ClmmPoolInfo;
use crate::sdk::TokenAmount;
use crate::utils::calc::clmm_math::liquidity_math::{
    get_amounts_from_liquidity, get_liquidity_from_amounts,
};
use crate::utils::calc::clmm_math::tick_math::get_sqrt_price_at_tick;
use crate::utils::calc::clmm_math::MathError;

/// Sized position change. `amount_a`/`amount_b` are the exact amounts the
/// liquidity figure corresponds to; the `_limit` pair carries the slippage
/// allowance (an upper bound for deposits, equal to the exact amounts for
/// withdrawals).
#[derive(Debug, Clone)]
pub struct LiquidityComputation {
    pub liquidity: u128,
    pub amount_a: TokenAmount,
    pub amount_b: TokenAmount,
    pub amount_a_limit: TokenAmount,
    pub amount_b_limit: TokenAmount,
}

/// Sizes a deposit into `[tick_lower, tick_upper]`.
///
/// Takes the liquidity both budgets can fund together at the current pool
/// price, then recomputes the amounts actually charged for it (rounded
/// against the depositor) and pads them by `slippage` for the limit pair.
/// Tick bounds may be given in either order.
pub fn liquidity_from_amounts(
    pool: &ClmmPoolInfo,
    amount_a_raw: u64,
    amount_b_raw: u64,
    tick_lower: i32,
    tick_upper: i32,
    slippage: &BigRational,
) -> Result<LiquidityComputation> {
    let (sqrt_lower, sqrt_upper) = sqrt_bounds(tick_lower, tick_upper)?;

    let liquidity = get_liquidity_from_amounts(
        pool.sqrt_price_x64,
        sqrt_lower,
        sqrt_upper,
        amount_a_raw,
        amount_b_raw,
    )?;
    let (amount_a, amount_b) =
        get_amounts_from_liquidity(pool.sqrt_price_x64, sqrt_lower, sqrt_upper, liquidity, true)?;

    Ok(LiquidityComputation {
        liquidity,
        amount_a: TokenAmount::new(pool.mint_a.clone(), amount_a),
        amount_b: TokenAmount::new(pool.mint_b.clone(), amount_b),
        amount_a_limit: TokenAmount::new(pool.mint_a.clone(), pad(amount_a, slippage)?),
        amount_b_limit: TokenAmount::new(pool.mint_b.clone(), pad(amount_b, slippage)?),
    })
}

/// Sizes the withdrawal of `liquidity` from `[tick_lower, tick_upper]`.
///
/// Amounts are rounded in the pool's favor and no slippage is applied, so
/// the limit pair equals the exact pair.
pub fn liquidity_for_withdrawal(
    pool: &ClmmPoolInfo,
    liquidity: u128,
    tick_lower: i32,
    tick_upper: i32,
) -> Result<LiquidityComputation> {
    let (sqrt_lower, sqrt_upper) = sqrt_bounds(tick_lower, tick_upper)?;

    let (amount_a, amount_b) =
        get_amounts_from_liquidity(pool.sqrt_price_x64, sqrt_lower, sqrt_upper, liquidity, false)?;

    let amount_a = TokenAmount::new(pool.mint_a.clone(), amount_a);
    let amount_b = TokenAmount::new(pool.mint_b.clone(), amount_b);
    Ok(LiquidityComputation {
        liquidity,
        amount_a_limit: amount_a.clone(),
        amount_b_limit: amount_b.clone(),
        amount_a,
        amount_b,
    })
}

fn sqrt_bounds(tick_lower: i32, tick_upper: i32) -> Result<(u128, u128)> {
    let (lower, upper) = if tick_lower <= tick_upper {
        (tick_lower, tick_upper)
    } else {
        (tick_upper, tick_lower)
    };
    Ok((get_sqrt_price_at_tick(lower)?, get_sqrt_price_at_tick(upper)?))
}

/// `ceil(raw * (1 + slippage))`, clamped to fit `u64`.
fn pad(raw: u64, slippage: &BigRational) -> Result<u64> {
    let scaled = BigRational::from_integer(BigInt::from(raw)) * (BigRational::one() + slippage);
    let padded = scaled.ceil().to_integer();
    Ok(padded.to_u64().ok_or(MathError::AmountOverflow)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdk::TokenInfo;
    use num_traits::Zero;
    use solana_sdk::pubkey::Pubkey;

    fn pool_at_tick_zero() -> ClmmPoolInfo {
        ClmmPoolInfo {
            id: Pubkey::new_unique(),
            mint_a: TokenInfo::new(Pubkey::new_unique(), 9),
            mint_b: TokenInfo::new(Pubkey::new_unique(), 6),
            tick_spacing: 10,
            tick_current: 0,
            sqrt_price_x64: 1u128 << 64,
            liquidity: 1_000_000,
        }
    }

    fn bps(value: i64) -> BigRational {
        BigRational::new(value.into(), 10_000.into())
    }

    #[test]
    fn tick_bound_order_does_not_matter() {
        let pool = pool_at_tick_zero();
        let slippage = bps(50);

        let forward =
            liquidity_from_amounts(&pool, 1_000_000, 2_000_000, -120, 120, &slippage).unwrap();
        let reversed =
            liquidity_from_amounts(&pool, 1_000_000, 2_000_000, 120, -120, &slippage).unwrap();

        assert_eq!(forward.liquidity, reversed.liquidity);
        assert_eq!(forward.amount_a.raw, reversed.amount_a.raw);
        assert_eq!(forward.amount_b_limit.raw, reversed.amount_b_limit.raw);
    }

    #[test]
    fn charged_amounts_stay_within_budget_plus_rounding() {
        let pool = pool_at_tick_zero();
        let result =
            liquidity_from_amounts(&pool, 1_000_000, 1_000_000, -100, 100, &bps(0)).unwrap();

        assert!(result.liquidity > 0);
        assert!(result.amount_a.raw <= 1_000_000 + 1);
        assert!(result.amount_b.raw <= 1_000_000 + 1);
    }

    #[test]
    fn range_above_current_price_charges_token_a_only() {
        let pool = pool_at_tick_zero();
        let result =
            liquidity_from_amounts(&pool, 1_000_000, 1_000_000, 100, 200, &bps(0)).unwrap();
        assert!(result.amount_a.raw > 0);
        assert_eq!(result.amount_b.raw, 0);
    }

    #[test]
    fn slippage_pads_the_limit_amounts() {
        let pool = pool_at_tick_zero();
        let result =
            liquidity_from_amounts(&pool, 1_000_000, 1_000_000, -100, 100, &bps(100)).unwrap();

        assert!(result.amount_a_limit.raw >= result.amount_a.raw);
        assert!(result.amount_b_limit.raw >= result.amount_b.raw);
        // 1% of a nonzero amount must move the limit.
        assert!(result.amount_a_limit.raw > result.amount_a.raw);
    }

    #[test]
    fn withdrawal_uses_no_slippage_and_rounds_down() {
        let pool = pool_at_tick_zero();
        let deposit =
            liquidity_from_amounts(&pool, 1_000_000, 1_000_000, -100, 100, &bps(0)).unwrap();
        let withdrawal =
            liquidity_for_withdrawal(&pool, deposit.liquidity, -100, 100).unwrap();

        assert_eq!(withdrawal.amount_a.raw, withdrawal.amount_a_limit.raw);
        assert_eq!(withdrawal.amount_b.raw, withdrawal.amount_b_limit.raw);
        assert!(withdrawal.amount_a.raw <= deposit.amount_a.raw);
        assert!(withdrawal.amount_b.raw <= deposit.amount_b.raw);
    }

    #[test]
    fn zero_width_range_is_rejected() {
        let pool = pool_at_tick_zero();
        assert!(liquidity_from_amounts(&pool, 1, 1, 40, 40, &BigRational::zero()).is_err());
    }
}
