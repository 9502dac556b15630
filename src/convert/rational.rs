//! Exact magnitudes as `Ratio<BigUint>`, plus what `num-rational` leaves out:
//! locating a value's binary/decimal magnitude and rounding it to an integer
//! at any power-of-two/power-of-ten scale.
//!
//! Ratios are built with [`Ratio::new_raw`] and never reduced. Everything
//! here cross-multiplies, so a canonical form buys nothing and the gcd of a
//! subnormal's denominator is expensive.

use std::cmp::Ordering;

use num_bigint::BigUint;
use num_rational::Ratio;
use num_traits::{One, Pow, Zero};

/// A strictly positive exact value.
pub(crate) type Exact = Ratio<BigUint>;

/// `digits × 10^exp10`. `digits` must be non-zero.
pub(crate) fn from_decimal(digits: BigUint, exp10: i64) -> Exact {
    debug_assert!(!digits.is_zero());
    let power = pow10(exp10.unsigned_abs());
    if exp10 >= 0 {
        Ratio::new_raw(digits * power, BigUint::one())
    } else {
        Ratio::new_raw(digits, power)
    }
}

/// `significand × 2^exp2`. `significand` must be non-zero.
pub(crate) fn from_binary(significand: BigUint, exp2: i64) -> Exact {
    debug_assert!(!significand.is_zero());
    let shift = exp2.unsigned_abs();
    if exp2 >= 0 {
        Ratio::new_raw(significand << shift, BigUint::one())
    } else {
        Ratio::new_raw(significand, BigUint::one() << shift)
    }
}

/// The `e` with `2^e <= value < 2^(e+1)`: the exponent `frexp` would report,
/// minus one.
pub(crate) fn floor_log2(value: &Exact) -> i64 {
    // Bit lengths pin the ratio to [2^(e-1), 2^(e+1)); one comparison decides
    let estimate = value.numer().bits() as i64 - value.denom().bits() as i64;
    if compare_scaled(value, estimate, 0) == Ordering::Less {
        estimate - 1
    } else {
        estimate
    }
}

/// The `k` with `10^k <= value < 10^(k+1)`.
pub(crate) fn floor_log10(value: &Exact) -> i64 {
    // log10(2) ~ 0.30103; the estimate is off by at most one either way
    let mut k = (floor_log2(value) * 30103).div_euclid(100_000);
    while compare_scaled(value, 0, k) == Ordering::Less {
        k -= 1;
    }
    while compare_scaled(value, 0, k + 1) != Ordering::Less {
        k += 1;
    }
    k
}

/// `value × 2^exp2 × 10^exp10`, still unreduced.
pub(crate) fn scaled(value: &Exact, exp2: i64, exp10: i64) -> Exact {
    let mut numer = value.numer().clone();
    let mut denom = value.denom().clone();

    let shift = exp2.unsigned_abs();
    if exp2 >= 0 {
        numer <<= shift;
    } else {
        denom <<= shift;
    }

    let power = pow10(exp10.unsigned_abs());
    if exp10 >= 0 {
        numer *= power;
    } else {
        denom *= power;
    }

    Ratio::new_raw(numer, denom)
}

/// `round(value × 2^exp2 × 10^exp10)`, ties to even.
pub(crate) fn round_scaled(value: &Exact, exp2: i64, exp10: i64) -> BigUint {
    round_half_even(&scaled(value, exp2, exp10))
}

/// Compares `value` with `2^exp2 × 10^exp10`.
fn compare_scaled(value: &Exact, exp2: i64, exp10: i64) -> Ordering {
    let moved = scaled(value, -exp2, -exp10);
    moved.numer().cmp(moved.denom())
}

/// Nearest integer to `value`. On an exact tie `round_up` is handed the
/// lower candidate and picks the direction.
pub(crate) fn round_nearest(value: &Exact, round_up: impl FnOnce(&BigUint) -> bool) -> BigUint {
    let (numer, denom) = (value.numer(), value.denom());
    let floor = numer / denom;
    let twice_remainder = (numer % denom) << 1u32;

    let up = match twice_remainder.cmp(denom) {
        Ordering::Greater => true,
        Ordering::Equal => round_up(&floor),
        Ordering::Less => false,
    };

    if up { floor + 1u8 } else { floor }
}

pub(crate) fn round_half_even(value: &Exact) -> BigUint {
    round_nearest(value, |floor| floor.bit(0))
}

pub(crate) fn pow10(exp: u64) -> BigUint {
    Pow::pow(BigUint::from(10u8), exp)
}
