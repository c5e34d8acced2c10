//! CLMM pool adapters: human-unit prices to ticks and deposit amounts to
//! position liquidity. Built on [`crate::utils::calc::clmm_math`].

pub mod position;
pub mod tick;

pub use position::{liquidity_for_withdrawal, liquidity_from_amounts, LiquidityComputation};
pub use tick::{price_and_tick, PriceBaseSide, TickPrice};
