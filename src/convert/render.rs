//! Bit fields to positional decimal text.

use num_bigint::BigUint;
use num_traits::One;

use crate::bitarray::BitArray;
use crate::convert::rational::{self, Exact, floor_log10, pow10, round_scaled};
use crate::error::{Error, Result};
use crate::fields::{Decoded, FloatBits};

impl<B: BitArray> FloatBits<B> {
    /// Renders the exact value with at most `precision` significant digits,
    /// rounding to nearest with ties to even on the digit stream.
    ///
    /// Output is always positional (never `1e-5` notation), keeps at least
    /// one fractional digit and drops any other trailing zero. Zero,
    /// infinities and NaN render as `0.0`, `-0.0`, `Infinity`, `-Infinity`
    /// and `NaN`.
    ///
    /// ```rust
    /// use flexfloat_codec::{FloatBits, Layout};
    ///
    /// let bits: FloatBits = FloatBits::from_decimal(Layout::SINGLE, "0.1").unwrap();
    /// assert_eq!(bits.to_decimal(20).unwrap(), "0.10000000149011611938");
    /// assert_eq!(bits.to_decimal(3).unwrap(), "0.1");
    /// ```
    pub fn to_decimal(&self, precision: usize) -> Result<String> {
        if precision == 0 {
            return Err(Error::InvalidPrecision);
        }

        let sign = if self.sign() { "-" } else { "" };
        let text = match self.exact_value() {
            Some(value) => render(&value, precision),
            None if self.is_nan() => return Ok("NaN".to_owned()),
            None if self.is_infinity() => "Infinity".to_owned(),
            None => "0.0".to_owned(),
        };
        Ok(format!("{sign}{text}"))
    }

    /// The exact magnitude of a non-zero finite value.
    pub(crate) fn exact_value(&self) -> Option<Exact> {
        let m = self.layout().mantissa_size();
        match self.decode() {
            Decoded::Subnormal { mantissa, .. } => Some(rational::from_binary(
                mantissa,
                self.layout().min_exponent() - m as i64,
            )),
            Decoded::Normal {
                exponent, mantissa, ..
            } => Some(rational::from_binary(
                (BigUint::one() << m) + mantissa,
                exponent as i64 - self.layout().bias() - m as i64,
            )),
            Decoded::Zero { .. } | Decoded::Infinity { .. } | Decoded::Nan { .. } => None,
        }
    }
}

/// Positional rendering of a positive dyadic value with `precision >= 1`
/// significant digits.
pub(crate) fn render(value: &Exact, precision: usize) -> String {
    // n / 2^k = n 5^k / 10^k has fewer significant digits than n and 2^k
    // have bits, so any precision past that renders the same text
    let exact_digits = value.numer().bits() + value.denom().bits();
    let precision = (precision as u64).min(exact_digits);

    let mut magnitude = floor_log10(value);
    let mut digits = round_scaled(value, 0, precision as i64 - 1 - magnitude);
    if digits == pow10(precision) {
        // 9.99.. rounded up to 10.0..
        digits /= 10u8;
        magnitude += 1;
    }

    let digits = digits.to_string();
    positional(digits.trim_end_matches('0'), magnitude)
}

/// Places the decimal point in `digits`, the first of which has weight
/// `10^magnitude`.
fn positional(digits: &str, magnitude: i64) -> String {
    if magnitude < 0 {
        let zeros = "0".repeat(magnitude.unsigned_abs() as usize - 1);
        return format!("0.{zeros}{digits}");
    }

    let integer_len = magnitude as usize + 1;
    if digits.len() <= integer_len {
        let zeros = "0".repeat(integer_len - digits.len());
        format!("{digits}{zeros}.0")
    } else {
        let (integer, fraction) = digits.split_at(integer_len);
        format!("{integer}.{fraction}")
    }
}
