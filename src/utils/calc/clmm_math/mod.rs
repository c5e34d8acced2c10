//! Client-side CLMM math library.
//!
//! Tick / sqrt-price conversion in Q64.64 fixed point and liquidity-amount
//! deltas, usable without any on-chain program dependency. Callers are the
//! tick and position adapters in [`crate::clmm`].

pub mod big_num;
pub mod fixed_point_64;
pub mod full_math;
pub mod liquidity_math;
pub mod tick_math;

pub use big_num::{U128, U256, U512};
pub use full_math::MulDiv;

use thiserror::Error;

/// Errors surfaced by the math library. These indicate malformed pool info
/// or out-of-range inputs and are propagated unchanged to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("tick {0} is outside the supported range")]
    TickOutOfRange(i32),
    #[error("sqrt price {0} is outside the supported range")]
    SqrtPriceOutOfRange(u128),
    #[error("division by zero in liquidity math")]
    DivisionByZero,
    #[error("token amount does not fit in u64")]
    AmountOverflow,
    #[error("price is not representable for this pool")]
    PriceNotRepresentable,
}
