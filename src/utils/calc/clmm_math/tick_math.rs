// Tick <-> sqrt-price conversion in Q64.64.
// Constants follow the Raydium CLMM program (Apache 2.0),
// https://github.com/raydium-io/raydium-clmm (libraries/tick_math.rs).

use super::big_num::U128;
use super::MathError;

/// The minimum tick.
pub const MIN_TICK: i32 = -443636;
/// The maximum tick.
pub const MAX_TICK: i32 = -MIN_TICK;

/// Smallest value `get_sqrt_price_at_tick` can return.
pub const MIN_SQRT_PRICE_X64: u128 = 4295048016;
/// Largest value `get_sqrt_price_at_tick` can return.
pub const MAX_SQRT_PRICE_X64: u128 = 79226673521066979257578248091;

/// `1.0001^(-2^(i-1) / 2)` in Q64.64, one entry per bit of `|tick|`.
const TICK_BIT_MULTIPLIERS: [u128; 19] = [
    0xfffcb933bd6fb800,
    0xfff97272373d4000,
    0xfff2e50f5f657000,
    0xffe5caca7e10f000,
    0xffcb9843d60f7000,
    0xff973b41fa98e800,
    0xff2ea16466c9b000,
    0xfe5dee046a9a3800,
    0xfcbe86c7900bb000,
    0xf987a7253ac65800,
    0xf3392b0822bb6000,
    0xe7159475a2caf000,
    0xd097f3bdfd2f2000,
    0xa9f746462d9f8000,
    0x70d869a156f31c00,
    0x31be135f97ed3200,
    0x9aa508b5b85a500,
    0x5d6af8dedc582c,
    0x2216e584f5fa,
];

/// Computes `1.0001^(tick/2)` as a Q64.64 number, the square root of the
/// token_1/token_0 ratio at `tick`.
pub fn get_sqrt_price_at_tick(tick: i32) -> Result<u128, MathError> {
    let abs_tick = tick.unsigned_abs();
    if abs_tick > MAX_TICK as u32 {
        return Err(MathError::TickOutOfRange(tick));
    }

    let mut ratio = U128::from(1u128 << 64);
    for (bit, multiplier) in TICK_BIT_MULTIPLIERS.iter().enumerate() {
        if abs_tick & (1u32 << bit) != 0 {
            ratio = (ratio * U128::from(*multiplier)) >> 64u64;
        }
    }

    if tick > 0 {
        ratio = U128::MAX / ratio;
    }
    Ok(ratio.as_u128())
}

/// Greatest tick such that `get_sqrt_price_at_tick(tick) <= sqrt_price_x64`.
pub fn get_tick_at_sqrt_price(sqrt_price_x64: u128) -> Result<i32, MathError> {
    if !(MIN_SQRT_PRICE_X64..MAX_SQRT_PRICE_X64).contains(&sqrt_price_x64) {
        return Err(MathError::SqrtPriceOutOfRange(sqrt_price_x64));
    }

    let msb: u32 = 128 - sqrt_price_x64.leading_zeros() - 1;
    let log2p_integer_x32 = (msb as i128 - 64) << 32;

    let mut bit: i128 = 0x8000_0000_0000_0000i128;
    let mut precision = 0;
    let mut log2p_fraction_x64 = 0;

    let mut r = if msb >= 64 {
        sqrt_price_x64 >> (msb - 63)
    } else {
        sqrt_price_x64 << (63 - msb)
    };

    const BIT_PRECISION: u32 = 16;
    while bit > 0 && precision < BIT_PRECISION {
        r *= r;
        let is_r_more_than_two = r >> 127_u32;
        r >>= 63 + is_r_more_than_two;
        log2p_fraction_x64 += bit * is_r_more_than_two as i128;
        bit >>= 1;
        precision += 1;
    }

    let log2p_fraction_x32 = log2p_fraction_x64 >> 32;
    let log2p_x32 = log2p_integer_x32 + log2p_fraction_x32;

    // Change of base: log_sqrt(1.0001)(p) with 64-bit precision margins.
    let log_sqrt_10001_x64 = log2p_x32 * 59543866431248i128;

    let tick_low = ((log_sqrt_10001_x64 - 184467440737095516i128) >> 64) as i32;
    let tick_high = ((log_sqrt_10001_x64 + 15793534762490258745i128) >> 64) as i32;

    Ok(if tick_low == tick_high {
        tick_low
    } else if get_sqrt_price_at_tick(tick_high)? <= sqrt_price_x64 {
        tick_high
    } else {
        tick_low
    })
}

/// Snaps `tick` to the nearest multiple of `tick_spacing` (ties round
/// toward positive infinity), clamped to the valid tick range.
pub fn snap_tick_to_spacing(tick: i32, tick_spacing: u16) -> i32 {
    let spacing = i32::from(tick_spacing.max(1));
    let snapped = (tick + spacing / 2).div_euclid(spacing) * spacing;

    let mut min_multiple = MIN_TICK.div_euclid(spacing) * spacing;
    if min_multiple < MIN_TICK {
        min_multiple += spacing;
    }
    let max_multiple = MAX_TICK.div_euclid(spacing) * spacing;
    snapped.clamp(min_multiple, max_multiple)
}
