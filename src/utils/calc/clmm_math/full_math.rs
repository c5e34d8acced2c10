//! Full-precision multiply-then-divide.
//!
//! Products are widened to the next integer size before dividing, so
//! `a * b / c` never truncates an intermediate.

use super::big_num::{U128, U256, U512};

pub trait MulDiv: Sized {
    /// `self * num / denom`, rounded toward zero. `None` on a zero
    /// denominator or when the quotient does not fit.
    fn mul_div_floor(self, num: Self, denom: Self) -> Option<Self>;

    /// `self * num / denom`, rounded away from zero.
    fn mul_div_ceil(self, num: Self, denom: Self) -> Option<Self>;
}

impl MulDiv for U128 {
    fn mul_div_floor(self, num: Self, denom: Self) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        let wide = widen_u128(self) * widen_u128(num);
        narrow_u256(wide / widen_u128(denom))
    }

    fn mul_div_ceil(self, num: Self, denom: Self) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        let wide = widen_u128(self) * widen_u128(num);
        narrow_u256(div_ceil_u256(wide, widen_u128(denom)))
    }
}

impl MulDiv for U256 {
    fn mul_div_floor(self, num: Self, denom: Self) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        let wide = widen_u256(self) * widen_u256(num);
        narrow_u512(wide / widen_u256(denom))
    }

    fn mul_div_ceil(self, num: Self, denom: Self) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        let wide = widen_u256(self) * widen_u256(num);
        narrow_u512(div_ceil_u512(wide, widen_u256(denom)))
    }
}

/// `a / b` rounded up. Caller guarantees `b != 0`.
pub fn div_ceil_u256(a: U256, b: U256) -> U256 {
    let (quotient, remainder) = a.div_mod(b);
    if remainder.is_zero() {
        quotient
    } else {
        quotient + U256::one()
    }
}

fn div_ceil_u512(a: U512, b: U512) -> U512 {
    let (quotient, remainder) = a.div_mod(b);
    if remainder.is_zero() {
        quotient
    } else {
        quotient + U512::one()
    }
}

fn widen_u128(v: U128) -> U256 {
    let mut limbs = [0u64; 4];
    limbs[..2].copy_from_slice(&v.0);
    U256(limbs)
}

fn narrow_u256(v: U256) -> Option<U128> {
    if v.0[2..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U128([v.0[0], v.0[1]]))
}

fn widen_u256(v: U256) -> U512 {
    let mut limbs = [0u64; 8];
    limbs[..4].copy_from_slice(&v.0);
    U512(limbs)
}

fn narrow_u512(v: U512) -> Option<U256> {
    if v.0[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    Some(U256([v.0[0], v.0[1], v.0[2], v.0[3]]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_floor_vs_ceil() {
        let a = U256::from(10u64);
        let b = U256::from(10u64);
        let c = U256::from(3u64);
        assert_eq!(a.mul_div_floor(b, c), Some(U256::from(33u64)));
        assert_eq!(a.mul_div_ceil(b, c), Some(U256::from(34u64)));
    }

    #[test]
    fn mul_div_survives_wide_intermediate() {
        // a * b overflows U128 but the quotient fits.
        let a = U128::from(u128::MAX / 2);
        let b = U128::from(4u64);
        let c = U128::from(2u64);
        assert_eq!(a.mul_div_floor(b, c), Some(U128::from(u128::MAX - 1)));
    }

    #[test]
    fn mul_div_zero_denominator() {
        let a = U128::from(1u64);
        assert_eq!(a.mul_div_floor(a, U128::zero()), None);
        assert_eq!(a.mul_div_ceil(a, U128::zero()), None);
    }
}
