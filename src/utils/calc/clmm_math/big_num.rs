//! Fixed-width big integers for CLMM math.
//!
//! `U128` is used for Q64.64 sqrt prices, `U256`/`U512` as mul-div
//! intermediates so products never truncate before the final division.

use uint::construct_uint;

construct_uint! {
    pub struct U128(2);
}

construct_uint! {
    pub struct U256(4);
}

construct_uint! {
    pub struct U512(8);
}
