//! # Decimal ↔ binary conversion
//!
//! The numeric engine. Decimal text is read into an exact rational, rounded
//! once (to nearest, ties to even) into a [`Layout`], and binary values are
//! rendered back from their exact rational value. No native float is ever
//! involved, so every layout up to [`Layout::MAX_MANTISSA_SIZE`] mantissa
//! bits converts exactly.
//!
//! The free functions speak the bit-string exchange format; [`Converter`]
//! bundles a layout with a display precision for callers that keep one
//! current layout around.
//!
//! ```rust
//! use flexfloat_codec::{Layout, convert};
//!
//! let bits = convert::decimal_to_binary("0.1", &Layout::SINGLE).unwrap();
//! assert_eq!(bits, "00111101110011001100110011001101");
//! assert_eq!(
//!     convert::binary_to_decimal(&bits, &Layout::SINGLE, 20).unwrap(),
//!     "0.10000000149011611938"
//! );
//! ```

use log::debug;

use crate::bitarray::DefaultBitArray;
use crate::error::{Error, Result};
use crate::fields::{FloatBits, SpecialValue, split};
use crate::layout::{Layout, get_predefined_layout};

mod decimal;
mod encode;
mod info;
mod rational;
mod render;

pub use info::ExtendedInfo;

/// Significant digits rendered when the caller does not ask otherwise.
pub const DEFAULT_PRECISION: usize = 20;

/// Encodes decimal text into the bit-string exchange format.
pub fn decimal_to_binary(text: &str, layout: &Layout) -> Result<String> {
    let bits = FloatBits::<DefaultBitArray>::from_decimal(*layout, text)?;
    debug!("{text:?} -> {bits:?}");
    Ok(bits.to_bits_string())
}

/// Renders a bit string with at most `precision` significant digits.
pub fn binary_to_decimal(bits: &str, layout: &Layout, precision: usize) -> Result<String> {
    let text = split(bits, layout)?.to_decimal(precision)?;
    debug!("{bits} ({layout}) -> {text}");
    Ok(text)
}

pub fn binary_to_decimal_ext(
    bits: &str,
    layout: &Layout,
    precision: usize,
) -> Result<ExtendedInfo> {
    split(bits, layout)?.extended_info(precision)
}

/// A current layout plus display precision.
///
/// The layout is only ever replaced wholesale; every conversion reads it by
/// value, so a `Converter` is freely shared across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Converter {
    layout: Layout,
    precision: usize,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(Layout::SINGLE)
    }
}

impl Converter {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn from_preset(name: &str) -> Result<Self> {
        get_predefined_layout(name).map(Self::new)
    }

    pub fn with_precision(self, precision: usize) -> Result<Self> {
        if precision == 0 {
            return Err(Error::InvalidPrecision);
        }
        Ok(Self { precision, ..self })
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Switches to another layout, returning the previous one.
    pub fn set_layout(&mut self, layout: Layout) -> Layout {
        debug!("layout {} -> {layout}", self.layout);
        std::mem::replace(&mut self.layout, layout)
    }

    pub fn decimal_to_binary(&self, text: &str) -> Result<String> {
        decimal_to_binary(text, &self.layout)
    }

    pub fn binary_to_decimal(&self, bits: &str) -> Result<String> {
        binary_to_decimal(bits, &self.layout, self.precision)
    }

    pub fn binary_to_decimal_ext(&self, bits: &str) -> Result<ExtendedInfo> {
        binary_to_decimal_ext(bits, &self.layout, self.precision)
    }

    /// Like [`Self::decimal_to_binary`], in the hex exchange format.
    pub fn decimal_to_hex(&self, text: &str) -> Result<String> {
        FloatBits::<DefaultBitArray>::from_decimal(self.layout, text)?.to_hex_string()
    }

    pub fn hex_to_decimal(&self, hex: &str) -> Result<String> {
        FloatBits::<DefaultBitArray>::from_hex_string(self.layout, hex)?.to_decimal(self.precision)
    }

    /// Bit string of a named value of the current layout.
    pub fn special(&self, value: SpecialValue) -> Result<String> {
        FloatBits::<DefaultBitArray>::special(self.layout, value).map(|bits| bits.to_bits_string())
    }
}
