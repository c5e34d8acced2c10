//! Q64.64 fixed-point constants.

/// Number of fractional bits in a Q64.64 value.
pub const RESOLUTION: u8 = 64;

/// 1.0 in Q64.64.
pub const Q64: u128 = 1u128 << 64;
