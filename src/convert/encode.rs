//! Decimal text to bit fields, rounding to nearest with ties to even on the
//! exact value.

use log::trace;
use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::bitarray::BitArray;
use crate::convert::decimal::{self, DecimalText};
use crate::convert::rational::{self, Exact, floor_log2, round_nearest, scaled};
use crate::error::Result;
use crate::fields::FloatBits;
use crate::layout::Layout;

impl<B: BitArray> FloatBits<B> {
    /// Encodes decimal text, rounding to the nearest representable value
    /// (ties to even). Magnitudes beyond the largest finite value become a
    /// signed infinity; magnitudes below half the smallest subnormal become
    /// a signed zero.
    ///
    /// ```rust
    /// use flexfloat_codec::{FloatBits, Layout};
    ///
    /// let bits: FloatBits = FloatBits::from_decimal(Layout::SINGLE, "3.0").unwrap();
    /// assert_eq!(bits.to_bits_string(), "01000000010000000000000000000000");
    ///
    /// let tiny: FloatBits = FloatBits::from_decimal(Layout::HALF, "-1e-10").unwrap();
    /// assert!(tiny.is_zero() && tiny.sign());
    /// ```
    pub fn from_decimal(layout: Layout, text: &str) -> Result<Self> {
        let parsed = decimal::parse(text)?;
        Self::from_decimal_text(layout, &parsed)
    }

    pub(crate) fn from_decimal_text(layout: Layout, text: &DecimalText) -> Result<Self> {
        let (negative, digits, exponent) = match text {
            DecimalText::Nan => return Self::nan(layout),
            DecimalText::Infinity { negative } => return Ok(Self::infinity(layout, *negative)),
            DecimalText::Finite {
                negative,
                digits,
                exponent,
                ..
            } => (*negative, digits, *exponent),
        };

        // Unsigned layouts keep the magnitude and drop the sign
        let negative = negative && layout.is_signed();
        if digits.is_zero() {
            return Ok(Self::zero(layout, negative));
        }

        // Settle absurd magnitudes before building a power of ten for them.
        // 8^L <= 10^L for L >= 0 and the reverse below, hence the factor 3.
        if let Some(magnitude) = text.magnitude() {
            let m = layout.mantissa_size() as i64;
            if magnitude > 0 && magnitude.saturating_mul(3) > layout.max_exponent() + 1 {
                trace!("10^{magnitude} overflows {layout}");
                return Ok(Self::infinity(layout, negative));
            }
            if magnitude < 0
                && magnitude.saturating_add(1).saturating_mul(3) < layout.min_exponent() - m - 1
            {
                trace!("10^{magnitude} underflows {layout}");
                return Ok(Self::zero(layout, negative));
            }
        }

        let value = rational::from_decimal(digits.clone(), exponent);
        Self::round_from(layout, negative, &value)
    }

    /// Rounds an exact non-zero magnitude into the layout.
    pub(crate) fn round_from(layout: Layout, negative: bool, value: &Exact) -> Result<Self> {
        let m = layout.mantissa_size() as i64;
        let min_exponent = layout.min_exponent();
        let exponent = floor_log2(value);

        if exponent > layout.max_exponent() {
            trace!("2^{exponent} overflows {layout}");
            return Ok(Self::infinity(layout, negative));
        }
        if exponent < min_exponent - m - 1 {
            trace!("2^{exponent} underflows {layout}");
            return Ok(Self::zero(layout, negative));
        }

        // Subnormals share the scale of the smallest normal
        let mut scale = exponent.max(min_exponent);
        let lower_biased = scale + layout.bias();
        // Ties go to the encoding whose last bit is even. Without fraction
        // bits that last bit belongs to the exponent field.
        let mut significand = round_nearest(&scaled(value, m - scale, 0), |floor| {
            if m == 0 && !floor.is_zero() {
                lower_biased.rem_euclid(2) == 1
            } else {
                floor.bit(0)
            }
        });
        if significand.bits() > m as u64 + 1 {
            // Rounded up to the next power of two
            significand >>= 1usize;
            scale += 1;
        }
        trace!("{exponent} -> significand {significand} × 2^({scale} - {m})");

        let implicit = BigUint::one() << m as usize;
        if significand < implicit {
            return Self::from_fields(layout, negative, &BigUint::zero(), &significand);
        }

        let biased = scale + layout.bias();
        if biased >= layout.max_biased_exponent() as i64 {
            return Ok(Self::infinity(layout, negative));
        }
        Self::from_fields(
            layout,
            negative,
            &BigUint::from(biased as u64),
            &(significand - implicit),
        )
    }
}
