//! Human-unit price to tick conversion for CLMM pools.

use anyhow::{bail, Result};
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

use crate::sdk::engine::ClmmPoolInfo;
use crate::utils::calc::clmm_math::tick_math::{
    get_sqrt_price_at_tick, get_tick_at_sqrt_price, snap_tick_to_spacing, MAX_SQRT_PRICE_X64,
    MIN_SQRT_PRICE_X64,
};
use crate::utils::calc::clmm_math::MathError;

/// Which side of the pool the quoted price treats as the base token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBaseSide {
    /// Price is token B per token A.
    Base,
    /// Price is token A per token B.
    Quote,
}

/// A tick snapped to the pool's spacing together with the exact price it
/// represents, oriented the same way the input price was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickPrice {
    pub tick: i32,
    pub price: BigRational,
}

/// Converts a human-unit price into the initializable tick nearest to it.
///
/// The tick grid is searched with a float estimate of the Q64.64 sqrt
/// price, then the returned price is re-derived exactly from the snapped
/// tick, so `price` is the true pool price at `tick`, not an echo of the
/// input.
pub fn price_and_tick(
    pool: &ClmmPoolInfo,
    price: &BigRational,
    base_side: PriceBaseSide,
) -> Result<TickPrice> {
    if !price.is_positive() {
        bail!(MathError::PriceNotRepresentable);
    }

    // Internally prices are token B per token A in raw units.
    let oriented = match base_side {
        PriceBaseSide::Base => price.clone(),
        PriceBaseSide::Quote => price.recip(),
    };

    let decimal_shift =
        i32::from(pool.mint_b.decimals) - i32::from(pool.mint_a.decimals);
    let raw_price = oriented
        .to_f64()
        .ok_or(MathError::PriceNotRepresentable)?
        * 10f64.powi(decimal_shift);
    if !raw_price.is_finite() || raw_price <= 0.0 {
        bail!(MathError::PriceNotRepresentable);
    }

    let sqrt_estimate = raw_price.sqrt() * 2f64.powi(64);
    let sqrt_price_x64 = if sqrt_estimate >= MAX_SQRT_PRICE_X64 as f64 {
        MAX_SQRT_PRICE_X64 - 1
    } else if sqrt_estimate <= MIN_SQRT_PRICE_X64 as f64 {
        MIN_SQRT_PRICE_X64
    } else {
        sqrt_estimate as u128
    };

    let tick = snap_tick_to_spacing(get_tick_at_sqrt_price(sqrt_price_x64)?, pool.tick_spacing);
    let exact_sqrt = BigInt::from(get_sqrt_price_at_tick(tick)?);

    // price = sqrt^2 / 2^128 in raw units, rescaled to human units.
    let numer = &exact_sqrt * &exact_sqrt * BigInt::from(10u8).pow(u32::from(pool.mint_a.decimals));
    let denom = (BigInt::from(1) << 128u32) * BigInt::from(10u8).pow(u32::from(pool.mint_b.decimals));
    let mut exact_price = BigRational::new(numer, denom);

    if base_side == PriceBaseSide::Quote {
        exact_price = exact_price.recip();
    }

    Ok(TickPrice { tick, price: exact_price })
}
