use num_bigint::BigUint;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bitarray::BitArray;
use crate::fields::FloatBits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FloatClass {
    Zero,
    Subnormal,
    Normal,
    Infinity,
    Nan,
}

impl FloatClass {
    pub fn is_finite(self) -> bool {
        !matches!(self, FloatClass::Infinity | FloatClass::Nan)
    }
}

/// A bit pattern read through its layout. Exactly one variant applies to
/// every pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Zero {
        sign: bool,
    },
    /// `±0.mantissa × 2^(1 - bias)`
    Subnormal {
        sign: bool,
        mantissa: BigUint,
    },
    /// `±1.mantissa × 2^(exponent - bias)`
    Normal {
        sign: bool,
        exponent: u64,
        mantissa: BigUint,
    },
    Infinity {
        sign: bool,
    },
    Nan {
        sign: bool,
        payload: BigUint,
    },
}

impl Decoded {
    pub fn class(&self) -> FloatClass {
        match self {
            Decoded::Zero { .. } => FloatClass::Zero,
            Decoded::Subnormal { .. } => FloatClass::Subnormal,
            Decoded::Normal { .. } => FloatClass::Normal,
            Decoded::Infinity { .. } => FloatClass::Infinity,
            Decoded::Nan { .. } => FloatClass::Nan,
        }
    }

    pub fn sign(&self) -> bool {
        match self {
            Decoded::Zero { sign }
            | Decoded::Subnormal { sign, .. }
            | Decoded::Normal { sign, .. }
            | Decoded::Infinity { sign }
            | Decoded::Nan { sign, .. } => *sign,
        }
    }
}

impl<B: BitArray> FloatBits<B> {
    pub fn classify(&self) -> FloatClass {
        let exponent_zero = self.exponent.all(false);
        let fraction_zero = self.fraction.all(false);

        match (self.is_special_exponent(), exponent_zero, fraction_zero) {
            (true, _, true) => FloatClass::Infinity,
            (true, _, false) => FloatClass::Nan,
            (false, true, true) => FloatClass::Zero,
            (false, true, false) => FloatClass::Subnormal,
            (false, false, _) => FloatClass::Normal,
        }
    }

    pub fn decode(&self) -> Decoded {
        let sign = self.sign;
        match self.classify() {
            FloatClass::Zero => Decoded::Zero { sign },
            FloatClass::Subnormal => Decoded::Subnormal {
                sign,
                mantissa: self.mantissa_field(),
            },
            FloatClass::Normal => Decoded::Normal {
                sign,
                exponent: self.biased_exponent(),
                mantissa: self.mantissa_field(),
            },
            FloatClass::Infinity => Decoded::Infinity { sign },
            FloatClass::Nan => Decoded::Nan {
                sign,
                payload: self.mantissa_field(),
            },
        }
    }

    /// A NaN whose most significant mantissa bit is set.
    pub fn is_quiet_nan(&self) -> bool {
        self.is_nan() && self.quiet_bit()
    }

    /// A NaN whose most significant mantissa bit is clear (the remaining
    /// payload is then necessarily non-zero).
    pub fn is_signaling_nan(&self) -> bool {
        self.is_nan() && !self.quiet_bit()
    }

    /// Mantissa bits below the quiet bit, when this is a NaN.
    pub fn nan_payload(&self) -> Option<BigUint> {
        if !self.is_nan() {
            return None;
        }
        let width = self.layout.mantissa_size() - 1;
        self.fraction.get_range(0..width).map(|bits| bits.to_biguint())
    }

    fn quiet_bit(&self) -> bool {
        self.layout
            .mantissa_size()
            .checked_sub(1)
            .and_then(|top| self.fraction.get(top).copied())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;
    use rstest::rstest;

    use super::*;
    use crate::fields::split;
    use crate::layout::Layout;
    use crate::tests::*;

    #[rstest]
    #[case("00000000000000000000000000000000", FloatClass::Zero)]
    #[case("10000000000000000000000000000000", FloatClass::Zero)]
    #[case("00000000000000000000000000000001", FloatClass::Subnormal)]
    #[case("10000000011111111111111111111111", FloatClass::Subnormal)]
    #[case("00000000100000000000000000000000", FloatClass::Normal)]
    #[case("01000000010000000000000000000000", FloatClass::Normal)]
    #[case("01111111011111111111111111111111", FloatClass::Normal)]
    #[case("01111111100000000000000000000000", FloatClass::Infinity)]
    #[case("11111111100000000000000000000000", FloatClass::Infinity)]
    #[case("01111111110000000000000000000001", FloatClass::Nan)]
    #[case("11111111100000000000000000000001", FloatClass::Nan)]
    fn test_classify_single(#[case] bits: &str, #[case] expected: FloatClass) {
        let bits = split(bits, &Layout::SINGLE).unwrap();
        assert_eq!(bits.classify(), expected);
        assert_eq!(bits.decode().class(), expected);
        assert_eq!(bits.decode().sign(), bits.sign());
        assert_eq!(bits.is_nan(), expected == FloatClass::Nan);
        assert_eq!(bits.is_infinity(), expected == FloatClass::Infinity);
        assert_eq!(bits.is_zero(), expected == FloatClass::Zero);
    }

    #[test]
    fn test_decode_fields() {
        let bits = split("0100000001000000", &Layout::HALF).unwrap();
        assert_eq!(
            bits.decode(),
            Decoded::Normal {
                sign: false,
                exponent: 16,
                mantissa: BigUint::from(1u32 << 6),
            }
        );

        let bits = split("1000000000000011", &Layout::HALF).unwrap();
        assert_eq!(
            bits.decode(),
            Decoded::Subnormal {
                sign: true,
                mantissa: BigUint::from(3u8),
            }
        );
    }

    #[test]
    fn test_nan_kinds() {
        let quiet = split("01111111110000000000000000000001", &Layout::SINGLE).unwrap();
        assert!(quiet.is_quiet_nan());
        assert!(!quiet.is_signaling_nan());
        assert_eq!(quiet.nan_payload(), Some(BigUint::from(1u8)));
        assert_eq!(
            quiet.decode(),
            Decoded::Nan {
                sign: false,
                payload: BigUint::from((1u32 << 22) | 1),
            }
        );

        let signaling = split("11111111100000000000000000000100", &Layout::SINGLE).unwrap();
        assert!(signaling.is_signaling_nan());
        assert_eq!(signaling.nan_payload(), Some(BigUint::from(4u8)));

        let one = split("00111111100000000000000000000000", &Layout::SINGLE).unwrap();
        assert!(!one.is_quiet_nan());
        assert_eq!(one.nan_payload(), None);
    }

    #[test]
    fn test_one_bit_exponent() {
        // No normals at all: 0 is subnormal/zero, 1 is infinity/NaN
        let layout = Layout::new(1, 1, 2).unwrap();
        let classes: Vec<FloatClass> = (0..16u8)
            .map(|n| split(&format!("{n:04b}"), &layout).unwrap().classify())
            .collect();
        assert_eq!(
            &classes[..4],
            &[
                FloatClass::Zero,
                FloatClass::Subnormal,
                FloatClass::Subnormal,
                FloatClass::Subnormal
            ]
        );
        assert!(!classes.contains(&FloatClass::Normal));
    }

    #[rstest]
    fn test_classification_is_total(mut rng: impl Rng, n_experiments: usize) {
        for _ in 0..n_experiments {
            let layout = Layout::new(
                rng.random_range(0..=1),
                rng.random_range(1..=12),
                rng.random_range(0..40),
            )
            .unwrap();
            let bits: String = (0..layout.total_size())
                .map(|_| if rng.random_bool(0.5) { '1' } else { '0' })
                .collect();
            let bits = split(&bits, &layout).unwrap();

            let flags = [
                bits.is_zero(),
                bits.classify() == FloatClass::Subnormal,
                bits.classify() == FloatClass::Normal,
                bits.is_infinity(),
                bits.is_nan(),
            ];
            assert_eq!(flags.iter().filter(|&&f| f).count(), 1, "{bits:?}");
            assert_eq!(bits.decode().class(), bits.classify());
            assert_eq!(bits.classify().is_finite(), !bits.is_infinity() && !bits.is_nan());
        }
    }
}
