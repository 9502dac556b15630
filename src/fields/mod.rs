//! # Bit fields
//!
//! [`FloatBits`] holds one encoded value split into its sign bit, exponent
//! field and fraction (mantissa) field for a given [`Layout`]. It performs no
//! numeric interpretation beyond classification: packing and unpacking never
//! round.
//!
//! ```text
//! "0 10000000 10000000000000000000000"   (single precision 3.0)
//!  │ └ exponent field = 128
//!  └ sign = false       └ mantissa field = 2^22
//! ```
//!
//! ```rust
//! use flexfloat_codec::{Layout, fields};
//! use num_bigint::BigUint;
//!
//! let bits = fields::split("01000000010000000000000000000000", &Layout::SINGLE).unwrap();
//! assert!(!bits.sign());
//! assert_eq!(bits.exponent_field(), BigUint::from(128u32));
//! assert_eq!(bits.mantissa_field(), BigUint::from(1u32 << 22));
//! ```

use std::fmt::{self, Debug};

use num_bigint::BigUint;

use crate::bitarray::{BitArray, DefaultBitArray};
use crate::error::{Error, Result};
use crate::layout::Layout;

pub mod classify;
pub mod special;

pub use classify::{Decoded, FloatClass};
pub use special::SpecialValue;

#[derive(Clone, PartialEq, Eq)]
pub struct FloatBits<B = DefaultBitArray> {
    layout: Layout,
    sign: bool,
    exponent: B,
    fraction: B,
}

impl<B: BitArray> FloatBits<B> {
    /// Assembles already sized fields. The sign must be `false` for layouts
    /// without a sign bit.
    pub fn new(layout: Layout, sign: bool, exponent: B, fraction: B) -> Result<Self> {
        if exponent.len() != layout.exponent_size() {
            return Err(Error::FieldOutOfRange {
                field: "exponent",
                width: layout.exponent_size(),
            });
        }
        if fraction.len() != layout.mantissa_size() {
            return Err(Error::FieldOutOfRange {
                field: "mantissa",
                width: layout.mantissa_size(),
            });
        }
        if sign && !layout.is_signed() {
            return Err(Error::FieldOutOfRange {
                field: "sign",
                width: 0,
            });
        }

        Ok(Self {
            layout,
            sign,
            exponent,
            fraction,
        })
    }

    /// Packs integer field values, zero padded to their declared widths.
    pub fn from_fields(
        layout: Layout,
        sign: bool,
        exponent_field: &BigUint,
        mantissa_field: &BigUint,
    ) -> Result<Self> {
        let exponent = B::from_biguint(exponent_field, layout.exponent_size()).ok_or(
            Error::FieldOutOfRange {
                field: "exponent",
                width: layout.exponent_size(),
            },
        )?;
        let fraction = B::from_biguint(mantissa_field, layout.mantissa_size()).ok_or(
            Error::FieldOutOfRange {
                field: "mantissa",
                width: layout.mantissa_size(),
            },
        )?;
        Self::new(layout, sign, exponent, fraction)
    }

    /// Splits a full-width bit array (LSB first) along the layout.
    pub fn from_bit_array(layout: Layout, bits: &B) -> Result<Self> {
        if bits.len() != layout.total_size() {
            return Err(Error::LengthMismatch {
                expected: layout.total_size(),
                found: bits.len(),
                unit: "bits",
            });
        }

        let sign = layout
            .sign_bit()
            .and_then(|i| bits.get(i).copied())
            .unwrap_or(false);
        let exponent = bits.get_range(layout.exponent_bits()).ok_or(Error::LengthMismatch {
            expected: layout.total_size(),
            found: bits.len(),
            unit: "bits",
        })?;
        let fraction = bits.get_range(layout.mantissa_bits()).ok_or(Error::LengthMismatch {
            expected: layout.total_size(),
            found: bits.len(),
            unit: "bits",
        })?;

        Self::new(layout, sign, exponent, fraction)
    }

    /// Parses the bit-string exchange format: `'0'`/`'1'`, MSB first,
    /// exactly `layout.total_size()` characters.
    pub fn from_bits_string(layout: Layout, bits: &str) -> Result<Self> {
        let found = bits.chars().count();
        if found != layout.total_size() {
            return Err(Error::LengthMismatch {
                expected: layout.total_size(),
                found,
                unit: "bits",
            });
        }
        Self::from_bit_array(layout, &B::from_bits_string(bits)?)
    }

    /// Parses the hex exchange format: MSB-first hex digits, exactly
    /// `layout.total_size() / 4` of them.
    pub fn from_hex_string(layout: Layout, hex: &str) -> Result<Self> {
        let expected = layout.hex_size()?;
        let found = hex.chars().count();
        if found != expected {
            return Err(Error::LengthMismatch {
                expected,
                found,
                unit: "hex digits",
            });
        }
        Self::from_bit_array(layout, &B::from_hex_string(hex)?)
    }

    /// Signed zero. An unsigned layout drops the sign.
    pub fn zero(layout: Layout, sign: bool) -> Self {
        Self {
            layout,
            sign: sign && layout.is_signed(),
            exponent: B::zeros(layout.exponent_size()),
            fraction: B::zeros(layout.mantissa_size()),
        }
    }

    /// Signed infinity. An unsigned layout drops the sign, as [`Self::zero`]
    /// does.
    pub fn infinity(layout: Layout, sign: bool) -> Self {
        Self {
            layout,
            sign: sign && layout.is_signed(),
            exponent: B::ones(layout.exponent_size()),
            fraction: B::zeros(layout.mantissa_size()),
        }
    }

    /// The canonical quiet NaN: positive, exponent all ones, only the most
    /// significant mantissa bit set.
    pub fn nan(layout: Layout) -> Result<Self> {
        Self::special(layout, SpecialValue::QuietNan)
    }

    /// Full-width bit array, LSB first.
    pub fn to_bit_array(&self) -> B {
        let sign = B::from_bits(&vec![self.sign; self.layout.sign_size()]);
        sign.concat(&self.exponent.concat(&self.fraction))
    }

    /// The bit-string exchange format.
    pub fn to_bits_string(&self) -> String {
        self.to_bit_array().to_bits_string()
    }

    /// The hex exchange format, uppercase.
    pub fn to_hex_string(&self) -> Result<String> {
        self.to_bit_array().to_hex_string()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn sign(&self) -> bool {
        self.sign
    }

    pub fn exponent(&self) -> &B {
        &self.exponent
    }

    pub fn fraction(&self) -> &B {
        &self.fraction
    }

    pub fn exponent_field(&self) -> BigUint {
        self.exponent.to_biguint()
    }

    pub fn mantissa_field(&self) -> BigUint {
        self.fraction.to_biguint()
    }

    /// The exponent field as a machine integer; it is at most
    /// [`Layout::MAX_EXPONENT_SIZE`] bits wide.
    pub fn biased_exponent(&self) -> u64 {
        self.exponent
            .iter_bits()
            .enumerate()
            .fold(0, |acc, (i, bit)| acc | (u64::from(bit) << i))
    }

    pub fn into_fields(self) -> (bool, BigUint, BigUint) {
        (self.sign, self.exponent.to_biguint(), self.fraction.to_biguint())
    }

    fn is_special_exponent(&self) -> bool {
        self.exponent.all(true)
    }

    pub fn is_nan(&self) -> bool {
        self.is_special_exponent() && !self.fraction.all(false)
    }

    pub fn is_infinity(&self) -> bool {
        self.is_special_exponent() && self.fraction.all(false)
    }

    pub fn is_zero(&self) -> bool {
        self.exponent.all(false) && self.fraction.all(false)
    }
}

impl<B: BitArray> Debug for FloatBits<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatBits")
            .field("layout", &format_args!("{}", self.layout))
            .field("sign", if self.sign { &'-' } else { &'+' })
            .field("exponent", &self.exponent_field())
            .field("fraction", &self.mantissa_field())
            .finish()
    }
}

/// Bit-field codec: splits a bit string into sign, exponent and mantissa.
pub fn split(bits: &str, layout: &Layout) -> Result<FloatBits> {
    FloatBits::from_bits_string(*layout, bits)
}

/// Bit-field codec: packs the three fields back into a bit string, sign
/// first, each field zero padded to its width.
pub fn join(
    sign: bool,
    exponent_field: &BigUint,
    mantissa_field: &BigUint,
    layout: &Layout,
) -> Result<String> {
    FloatBits::<DefaultBitArray>::from_fields(*layout, sign, exponent_field, mantissa_field)
        .map(|bits| bits.to_bits_string())
}

/// Radix change from the bit-string to the hex exchange format.
pub fn bits_to_hex(bits: &str, layout: &Layout) -> Result<String> {
    split(bits, layout)?.to_hex_string()
}

/// Radix change from the hex to the bit-string exchange format.
pub fn hex_to_bits(hex: &str, layout: &Layout) -> Result<String> {
    FloatBits::<DefaultBitArray>::from_hex_string(*layout, hex).map(|bits| bits.to_bits_string())
}
