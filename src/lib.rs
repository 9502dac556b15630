//! # FlexFloat Codec
//!
//! Exact conversion between decimal text and binary floating-point encodings
//! whose layout (sign, exponent and mantissa widths) is a runtime parameter
//! rather than one of the hard-coded 16/32/64-bit formats.
//!
//! ## Overview
//!
//! FlexFloat Codec provides:
//! - **Configurable layouts**: any `0|1 / 1..=20 / 0..=65536` bit split, plus
//!   named presets (half, single, double, quadruple, bfloat16, fp8, ...)
//! - **Correct rounding**: decimal input is rounded once, to nearest with ties
//!   to even, using arbitrary-precision integers only
//! - **Exact rendering**: binary values are printed from their exact value
//!   with a caller-chosen number of significant digits
//! - **IEEE 754 semantics**: signed zeros, subnormals, infinities and NaNs are
//!   derived from the widths alone
//!
//! ## Architecture
//!
//! ### BitArray Module
//! LSB-first bit storage with the conversions the codec needs (bit strings,
//! hex strings, big integers).
//!
//! ### Layout Module
//! The [`Layout`] value type, its derived constants and the preset registry.
//!
//! ### Fields Module
//! [`FloatBits`]: one encoded value split into sign, exponent and fraction,
//! with classification and the named special values of a layout.
//!
//! ### Convert Module
//! Decimal parsing, rounding and rendering, and the string-level boundary
//! functions.
//!
//! ## Quick Start
//!
//! ```rust
//! use flexfloat_codec::prelude::*;
//!
//! let layout = get_predefined_layout("single").unwrap();
//! let bits = decimal_to_binary("3.0", &layout).unwrap();
//! assert_eq!(bits, "01000000010000000000000000000000");
//!
//! let info = binary_to_decimal_ext(&bits, &layout, DEFAULT_PRECISION).unwrap();
//! assert_eq!(info.exponent, 1);
//! assert_eq!(info.mantissa, "1.5");
//!
//! // Layouts are not limited to the usual sizes
//! let custom = Layout::new(1, 6, 9).unwrap();
//! let bits = decimal_to_binary("0.1", &custom).unwrap();
//! assert_eq!(binary_to_decimal(&bits, &custom, 6).unwrap(), "0.0999756");
//! ```
//!
//! ## Special Values
//!
//! ```rust
//! use flexfloat_codec::prelude::*;
//!
//! let converter = Converter::new(Layout::HALF);
//! assert_eq!(converter.decimal_to_binary("-Infinity").unwrap(), "1111110000000000");
//! assert_eq!(converter.binary_to_decimal("0111111000000000").unwrap(), "NaN");
//! assert_eq!(
//!     converter.special(SpecialValue::SmallestPositiveSubnormal).unwrap(),
//!     "0000000000000001"
//! );
//! ```

pub mod bitarray;
pub mod convert;
pub mod error;
pub mod fields;
pub mod layout;

// Re-export the main types for convenience
pub use bitarray::{BitArray, BoolBitArray, DefaultBitArray};
pub use convert::{
    Converter, DEFAULT_PRECISION, ExtendedInfo, binary_to_decimal, binary_to_decimal_ext,
    decimal_to_binary,
};
pub use error::{BadCharacter, Error, Result};
pub use fields::{FloatBits, FloatClass, SpecialValue};
pub use layout::{Layout, Preset, get_predefined_layout};

pub mod prelude {
    //! Prelude module for FlexFloat Codec.
    //!
    //! Re-exports the layout, bit-field and conversion types most callers
    //! need in one import.

    pub use crate::bitarray::{BitArray, DefaultBitArray};
    pub use crate::convert::{
        Converter, DEFAULT_PRECISION, ExtendedInfo, binary_to_decimal, binary_to_decimal_ext,
        decimal_to_binary,
    };
    pub use crate::error::{Error, Result};
    pub use crate::fields::{Decoded, FloatBits, FloatClass, SpecialValue};
    pub use crate::layout::{Layout, Preset, get_predefined_layout};
}
