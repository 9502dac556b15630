use num_bigint::BigUint;
use num_traits::One;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bitarray::BitArray;
use crate::convert::rational;
use crate::convert::render::render;
use crate::error::{Error, Result};
use crate::fields::{Decoded, FloatBits, FloatClass};

/// A decoded value in the didactic `±mantissa × 2^exponent` form.
///
/// `exponent` and `mantissa` only carry meaning while
/// `are_exponent_and_mantissa_valid` holds; for infinities and NaNs they are
/// the all-ones exponent read as a normal one and an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtendedInfo {
    pub is_positive: bool,
    pub is_denormalized: bool,
    pub are_exponent_and_mantissa_valid: bool,
    /// Unbiased; `1 - bias` for zeros and subnormals.
    pub exponent: i64,
    /// The full significand, `1.f` for normals and `0.f` for subnormals,
    /// rendered like [`FloatBits::to_decimal`].
    pub mantissa: String,
    pub class: FloatClass,
}

impl<B: BitArray> FloatBits<B> {
    /// ```rust
    /// use flexfloat_codec::{FloatBits, Layout};
    ///
    /// let bits: FloatBits = FloatBits::from_decimal(Layout::SINGLE, "3.0").unwrap();
    /// let info = bits.extended_info(20).unwrap();
    /// assert_eq!((info.mantissa.as_str(), info.exponent), ("1.5", 1));
    /// ```
    pub fn extended_info(&self, precision: usize) -> Result<ExtendedInfo> {
        if precision == 0 {
            return Err(Error::InvalidPrecision);
        }

        let layout = self.layout();
        let m = layout.mantissa_size();
        let (exponent, significand) = match self.decode() {
            Decoded::Zero { .. } => (layout.min_exponent(), None),
            Decoded::Subnormal { mantissa, .. } => (layout.min_exponent(), Some(mantissa)),
            Decoded::Normal {
                exponent, mantissa, ..
            } => (
                exponent as i64 - layout.bias(),
                Some((BigUint::one() << m) + mantissa),
            ),
            Decoded::Infinity { .. } | Decoded::Nan { .. } => (layout.max_exponent() + 1, None),
        };

        let class = self.classify();
        let mantissa = match significand {
            Some(significand) => {
                render(&rational::from_binary(significand, -(m as i64)), precision)
            }
            None if class == FloatClass::Zero => "0.0".to_owned(),
            None => String::new(),
        };

        Ok(ExtendedInfo {
            is_positive: !self.sign(),
            is_denormalized: class == FloatClass::Subnormal,
            are_exponent_and_mantissa_valid: class.is_finite(),
            exponent,
            mantissa,
            class,
        })
    }
}
