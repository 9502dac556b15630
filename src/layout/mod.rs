//! # Layouts
//!
//! A [`Layout`] is the bit-width triple of a binary floating-point format:
//!
//! ```text
//! [Sign: 0 or 1 bit][Exponent: E bits][Mantissa: M bits]
//! ```
//!
//! Every other constant (bias, exponent range, bit positions) is derived from
//! those three widths, so the half, single and double precision formats are
//! just three values of the same type.
//!
//! ```rust
//! use flexfloat_codec::Layout;
//!
//! let single = Layout::new(1, 8, 23).unwrap();
//! assert_eq!(single.total_size(), 32);
//! assert_eq!(single.bias(), 127);
//! assert_eq!(single, Layout::SINGLE);
//! assert_eq!("1/8/23".parse::<Layout>().unwrap(), single);
//! ```

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod registry;

pub use registry::{Preset, get_predefined_layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(
        try_from = "(usize, usize, usize)",
        into = "(usize, usize, usize)"
    )
)]
pub struct Layout {
    sign_size: usize,
    exponent_size: usize,
    mantissa_size: usize,
}

impl Layout {
    /// Widest exponent field accepted. Keeps the exact values of the
    /// smallest subnormals within a few hundred thousand bits.
    pub const MAX_EXPONENT_SIZE: usize = 20;
    /// Widest mantissa field accepted.
    pub const MAX_MANTISSA_SIZE: usize = 1 << 16;

    pub const HALF: Self = Self::from_widths(1, 5, 10);
    pub const SINGLE: Self = Self::from_widths(1, 8, 23);
    pub const DOUBLE: Self = Self::from_widths(1, 11, 52);
    pub const QUADRUPLE: Self = Self::from_widths(1, 15, 112);
    pub const OCTUPLE: Self = Self::from_widths(1, 19, 236);
    pub const BFLOAT16: Self = Self::from_widths(1, 8, 7);
    pub const TENSOR_FLOAT32: Self = Self::from_widths(1, 8, 10);
    pub const FP8_E4M3: Self = Self::from_widths(1, 4, 3);
    pub const FP8_E5M2: Self = Self::from_widths(1, 5, 2);

    const fn from_widths(sign_size: usize, exponent_size: usize, mantissa_size: usize) -> Self {
        Self {
            sign_size,
            exponent_size,
            mantissa_size,
        }
    }

    /// Builds a custom layout, checking `sign_size ∈ {0, 1}`,
    /// `1 <= exponent_size <= MAX_EXPONENT_SIZE` and
    /// `mantissa_size <= MAX_MANTISSA_SIZE`.
    pub fn new(sign_size: usize, exponent_size: usize, mantissa_size: usize) -> Result<Self> {
        let invalid = |reason| Error::InvalidLayout {
            sign: sign_size,
            exponent: exponent_size,
            mantissa: mantissa_size,
            reason,
        };

        if sign_size > 1 {
            return Err(invalid("the sign field is either 0 or 1 bit wide"));
        }
        if exponent_size == 0 {
            return Err(invalid("the exponent field needs at least one bit"));
        }
        if exponent_size > Self::MAX_EXPONENT_SIZE {
            return Err(invalid("the exponent field is wider than Layout::MAX_EXPONENT_SIZE"));
        }
        if mantissa_size > Self::MAX_MANTISSA_SIZE {
            return Err(invalid("the mantissa field is wider than Layout::MAX_MANTISSA_SIZE"));
        }

        Ok(Self::from_widths(sign_size, exponent_size, mantissa_size))
    }

    pub const fn sign_size(&self) -> usize {
        self.sign_size
    }

    pub const fn exponent_size(&self) -> usize {
        self.exponent_size
    }

    pub const fn mantissa_size(&self) -> usize {
        self.mantissa_size
    }

    pub const fn total_size(&self) -> usize {
        self.sign_size + self.exponent_size + self.mantissa_size
    }

    pub const fn is_signed(&self) -> bool {
        self.sign_size == 1
    }

    /// `2^(exponent_size - 1) - 1`
    pub const fn bias(&self) -> i64 {
        (1 << (self.exponent_size - 1)) - 1
    }

    /// The all-ones exponent field, reserved for infinities and NaNs.
    pub const fn max_biased_exponent(&self) -> u64 {
        (1 << self.exponent_size) - 1
    }

    /// Unbiased exponent of the smallest normal number, which is also the
    /// scale shared by all subnormals.
    pub const fn min_exponent(&self) -> i64 {
        1 - self.bias()
    }

    /// Unbiased exponent of the largest finite number. Lower than
    /// [`Self::min_exponent`] for 1-bit exponents, which have no normals.
    pub const fn max_exponent(&self) -> i64 {
        self.max_biased_exponent() as i64 - 1 - self.bias()
    }

    /// Significand bits including the implicit leading bit.
    pub const fn precision(&self) -> usize {
        self.mantissa_size + 1
    }

    /// Significant decimal digits that make a decimal rendering parse back
    /// to the exact same bits: `1 + ceil(precision * log10(2))`.
    pub const fn round_trip_precision(&self) -> usize {
        // 30103 / 100000 is log10(2) rounded up to five digits
        1 + (self.precision() * 30103).div_ceil(100_000)
    }

    pub const fn is_hex_aligned(&self) -> bool {
        self.total_size() % 4 == 0
    }

    /// Number of hex digits in the hex exchange format.
    pub fn hex_size(&self) -> Result<usize> {
        if self.is_hex_aligned() {
            Ok(self.total_size() / 4)
        } else {
            Err(Error::partial_nibble(self.total_size()))
        }
    }

    // Bit positions below are LSB first, the mantissa occupying the lowest bits.

    pub const fn sign_bit(&self) -> Option<usize> {
        if self.is_signed() {
            Some(self.exponent_size + self.mantissa_size)
        } else {
            None
        }
    }

    pub const fn exponent_bits(&self) -> Range<usize> {
        self.mantissa_size..self.mantissa_size + self.exponent_size
    }

    pub const fn mantissa_bits(&self) -> Range<usize> {
        0..self.mantissa_size
    }
}

impl TryFrom<(usize, usize, usize)> for Layout {
    type Error = Error;

    fn try_from((sign, exponent, mantissa): (usize, usize, usize)) -> Result<Self> {
        Self::new(sign, exponent, mantissa)
    }
}

impl From<Layout> for (usize, usize, usize) {
    fn from(layout: Layout) -> Self {
        (layout.sign_size, layout.exponent_size, layout.mantissa_size)
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.sign_size, self.exponent_size, self.mantissa_size
        )
    }
}

/// Parses the `sign/exponent/mantissa` notation, e.g. `"1/8/23"`.
impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut widths = s.trim().split('/').map(|w| w.trim().parse::<usize>());
        match (widths.next(), widths.next(), widths.next(), widths.next()) {
            (Some(Ok(sign)), Some(Ok(exponent)), Some(Ok(mantissa)), None) => {
                Self::new(sign, exponent, mantissa)
            }
            _ => Err(Error::UnknownPreset(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::error::BadCharacter;

    #[rstest]
    #[case(Layout::HALF, 16, 15, 31, -14, 15, 5)]
    #[case(Layout::SINGLE, 32, 127, 255, -126, 127, 9)]
    #[case(Layout::DOUBLE, 64, 1023, 2047, -1022, 1023, 17)]
    #[case(Layout::QUADRUPLE, 128, 16383, 32767, -16382, 16383, 36)]
    #[case(Layout::BFLOAT16, 16, 127, 255, -126, 127, 4)]
    #[case(Layout::FP8_E4M3, 8, 7, 15, -6, 7, 3)]
    fn test_derived_constants(
        #[case] layout: Layout,
        #[case] total_size: usize,
        #[case] bias: i64,
        #[case] max_biased_exponent: u64,
        #[case] min_exponent: i64,
        #[case] max_exponent: i64,
        #[case] round_trip_precision: usize,
    ) {
        assert_eq!(layout.total_size(), total_size);
        assert_eq!(layout.bias(), bias);
        assert_eq!(layout.max_biased_exponent(), max_biased_exponent);
        assert_eq!(layout.min_exponent(), min_exponent);
        assert_eq!(layout.max_exponent(), max_exponent);
        assert_eq!(layout.round_trip_precision(), round_trip_precision);
    }

    #[test]
    fn test_bit_positions() {
        let layout = Layout::SINGLE;
        assert_eq!(layout.sign_bit(), Some(31));
        assert_eq!(layout.exponent_bits(), 23..31);
        assert_eq!(layout.mantissa_bits(), 0..23);

        let layout = Layout::TENSOR_FLOAT32;
        assert_eq!(layout.total_size(), 19);
        assert_eq!(layout.sign_bit(), Some(18));
        assert_eq!(layout.exponent_bits(), 10..18);
        assert!(!layout.is_hex_aligned());
        assert!(matches!(
            layout.hex_size(),
            Err(Error::InvalidCharacter(BadCharacter::PartialNibble(19)))
        ));

        let unsigned = Layout::new(0, 4, 4).unwrap();
        assert_eq!(unsigned.sign_bit(), None);
        assert_eq!(unsigned.hex_size(), Ok(2));
    }

    #[test]
    fn test_validation() {
        assert!(Layout::new(1, 1, 0).is_ok());
        assert!(Layout::new(0, 20, 4096).is_ok());
        assert!(Layout::new(1, 15, 10_000).is_ok());
        assert!(Layout::new(1, 8, Layout::MAX_MANTISSA_SIZE).is_ok());

        for (sign, exponent, mantissa) in [
            (2, 8, 23),
            (1, 0, 23),
            (1, Layout::MAX_EXPONENT_SIZE + 1, 10),
            (1, 8, Layout::MAX_MANTISSA_SIZE + 1),
        ] {
            assert!(matches!(
                Layout::new(sign, exponent, mantissa),
                Err(Error::InvalidLayout { .. })
            ));
        }
    }

    #[test]
    fn test_one_bit_exponent() {
        let layout = Layout::new(1, 1, 2).unwrap();
        assert_eq!(layout.bias(), 0);
        assert_eq!(layout.min_exponent(), 1);
        assert_eq!(layout.max_exponent(), 0);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(" 1 / 5 / 10 ".parse::<Layout>().unwrap(), Layout::HALF);
        assert_eq!(Layout::DOUBLE.to_string(), "1/11/52");
        assert!(matches!(
            "1/8".parse::<Layout>(),
            Err(Error::UnknownPreset(_))
        ));
        assert!(matches!(
            "1/8/23/4".parse::<Layout>(),
            Err(Error::UnknownPreset(_))
        ));
        assert!(matches!(
            "3/8/23".parse::<Layout>(),
            Err(Error::InvalidLayout { .. })
        ));
        assert_eq!(
            Layout::try_from((1, 8, 7)).unwrap(),
            Layout::BFLOAT16
        );
        assert_eq!(<(usize, usize, usize)>::from(Layout::HALF), (1, 5, 10));
    }
}
