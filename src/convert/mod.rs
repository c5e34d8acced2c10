//! Best-effort conversion passes between the UI's exact-rational domain
//! and the engine's decimal / base-58 domain. Nothing in this module
//! returns an error: values that cannot be converted pass through
//! unchanged.

pub mod address;
pub mod decimal;

pub use address::{deep_addresses_to_strings, deep_strings_to_addresses, try_parse_address};
pub use decimal::{
    decimal_to_rational, deep_decimals_to_rationals, deep_rationals_to_decimals,
    rational_to_decimal, DEFAULT_FRACTION_DIGITS,
};
