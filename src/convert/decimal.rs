//! Decimal text accepted by the encoder:
//!
//! ```text
//! [ws] [+|-] ( digits [. digits] [(e|E) [+|-] digits] | inf | infinity | nan ) [ws]
//! ```
//!
//! The special words are matched case-insensitively. Nothing is ever
//! approximated: the digits become one `BigUint` and the position of the
//! decimal point a power-of-ten exponent.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DecimalText {
    Nan,
    Infinity {
        negative: bool,
    },
    /// `±digits × 10^exponent`.
    Finite {
        negative: bool,
        digits: BigUint,
        exponent: i64,
        /// Number of digits once leading zeros are dropped; zero for zero.
        significant: usize,
    },
}

impl DecimalText {
    /// Decimal order of magnitude `L` with `10^L <= |value| < 10^(L+1)`,
    /// `None` for zero and the special words.
    pub(crate) fn magnitude(&self) -> Option<i64> {
        match self {
            DecimalText::Finite {
                exponent,
                significant,
                ..
            } if *significant > 0 => Some(exponent.saturating_add(*significant as i64 - 1)),
            _ => None,
        }
    }
}

pub(crate) fn parse(input: &str) -> Result<DecimalText> {
    let text = input.trim();
    if text.is_empty() {
        return Err(Error::malformed(input, "empty input"));
    }

    let (negative, body) = match text.as_bytes()[0] {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };

    match body.to_ascii_lowercase().as_str() {
        "nan" => return Ok(DecimalText::Nan),
        "inf" | "infinity" => return Ok(DecimalText::Infinity { negative }),
        _ => {}
    }

    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(at) => (&body[..at], Some(&body[at + 1..])),
        None => (body, None),
    };
    let (integer, fraction) = match mantissa.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (mantissa, None),
    };

    if integer.is_empty() {
        return Err(Error::malformed(input, "expected a digit"));
    }
    if !is_digits(integer) {
        return Err(Error::malformed(input, "unexpected character"));
    }
    let fraction = match fraction {
        Some("") => {
            return Err(Error::malformed(
                input,
                "expected a digit after the decimal point",
            ));
        }
        Some(fraction) if fraction.contains('.') => {
            return Err(Error::malformed(input, "more than one decimal point"));
        }
        Some(fraction) if !is_digits(fraction) => {
            return Err(Error::malformed(input, "unexpected character"));
        }
        Some(fraction) => fraction,
        None => "",
    };
    let exponent = match exponent {
        Some(exponent) => parse_exponent(exponent).ok_or_else(|| {
            Error::malformed(input, "expected an integer exponent after 'e'")
        })?,
        None => 0,
    };

    let all_digits = [integer, fraction].concat();
    let significant = all_digits.trim_start_matches('0').len();
    let digits = if significant == 0 {
        BigUint::zero()
    } else {
        BigUint::parse_bytes(all_digits.as_bytes(), 10)
            .ok_or_else(|| Error::malformed(input, "unexpected character"))?
    };

    Ok(DecimalText::Finite {
        negative,
        digits,
        exponent: exponent.saturating_sub(fraction.len() as i64),
        significant,
    })
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Signed decimal integer, saturating instead of overflowing: any exponent
/// beyond `i64` lies far outside every layout anyway.
fn parse_exponent(s: &str) -> Option<i64> {
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !is_digits(digits) {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
