use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid layout {sign}/{exponent}/{mantissa}: {reason}")]
    InvalidLayout {
        sign: usize,
        exponent: usize,
        mantissa: usize,
        reason: &'static str,
    },

    #[error("unknown preset layout {0:?}")]
    UnknownPreset(String),

    #[error("malformed decimal {input:?}: {reason}")]
    MalformedDecimal { input: String, reason: &'static str },

    #[error("expected {expected} {unit}, got {found}")]
    LengthMismatch {
        expected: usize,
        found: usize,
        unit: &'static str,
    },

    #[error("invalid character {0}")]
    InvalidCharacter(BadCharacter),

    #[error("{field} field value does not fit in {width} bits")]
    FieldOutOfRange { field: &'static str, width: usize },

    #[error("{0} cannot be represented by this layout")]
    Unrepresentable(&'static str),

    #[error("display precision must be at least one significant digit")]
    InvalidPrecision,
}

/// What made a bit or hex string unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BadCharacter {
    #[error("{found:?} at position {position}, expected {expected}")]
    Unexpected {
        found: char,
        position: usize,
        expected: &'static str,
    },
    /// The bits do not group into whole hex digits.
    #[error("grouping: {0} bits leave a partial hex digit")]
    PartialNibble(usize),
}

impl Error {
    pub(crate) fn unexpected(found: char, position: usize, expected: &'static str) -> Self {
        Self::InvalidCharacter(BadCharacter::Unexpected {
            found,
            position,
            expected,
        })
    }

    pub(crate) fn partial_nibble(n_bits: usize) -> Self {
        Self::InvalidCharacter(BadCharacter::PartialNibble(n_bits))
    }

    pub(crate) fn malformed(input: &str, reason: &'static str) -> Self {
        Self::MalformedDecimal {
            input: input.to_owned(),
            reason,
        }
    }
}
