//! Named landmark values of a layout (zero, infinities, NaNs, the subnormal
//! and normal extremes, one and its neighbours), constructed from the widths
//! alone.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::bitarray::BitArray;
use crate::error::{Error, Result};
use crate::fields::{FloatBits, FloatClass};
use crate::layout::Layout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecialValue {
    Zero(bool),
    Infinity(bool),
    /// The canonical NaN: only the most significant mantissa bit set.
    QuietNan,
    Nan {
        signaling: bool,
        payload: BigUint,
    },

    SmallestPositiveSubnormal,
    LargestSubnormal,
    SmallestPositiveNormal,
    LargestNormal,
    LargestLessThanOne,
    One,
    SmallestLargerThanOne,
}

impl SpecialValue {
    /// The positive landmarks [`FloatBits::identify`] recognises, in
    /// increasing order of magnitude.
    const LANDMARKS: [SpecialValue; 7] = [
        SpecialValue::SmallestPositiveSubnormal,
        SpecialValue::LargestSubnormal,
        SpecialValue::SmallestPositiveNormal,
        SpecialValue::LargestLessThanOne,
        SpecialValue::One,
        SpecialValue::SmallestLargerThanOne,
        SpecialValue::LargestNormal,
    ];
}

impl<B: BitArray> FloatBits<B> {
    pub fn special(layout: Layout, value: SpecialValue) -> Result<Self> {
        let m = layout.mantissa_size();
        let all_ones = |width: usize| (BigUint::one() << width) - BigUint::one();
        let quiet_bit = || BigUint::one() << (m - 1);

        match value {
            SpecialValue::Zero(sign) => Ok(Self::zero(layout, sign)),
            SpecialValue::Infinity(sign) => Ok(Self::infinity(layout, sign)),
            SpecialValue::QuietNan => {
                if m == 0 {
                    return Err(Error::Unrepresentable("NaN"));
                }
                Self::encoded(layout, special_exponent(&layout), quiet_bit())
            }
            SpecialValue::Nan { signaling, payload } => {
                // The payload lives below the quiet bit
                if m == 0 || payload.bits() >= m as u64 {
                    return Err(Error::Unrepresentable("NaN payload"));
                }
                if signaling && payload.is_zero() {
                    return Err(Error::Unrepresentable("signaling NaN without payload"));
                }
                let mantissa = if signaling {
                    payload
                } else {
                    quiet_bit() | payload
                };
                Self::encoded(layout, special_exponent(&layout), mantissa)
            }
            SpecialValue::SmallestPositiveSubnormal => {
                if m == 0 {
                    return Err(Error::Unrepresentable("a subnormal"));
                }
                Self::encoded(layout, BigUint::zero(), BigUint::one())
            }
            SpecialValue::LargestSubnormal => {
                if m == 0 {
                    return Err(Error::Unrepresentable("a subnormal"));
                }
                Self::encoded(layout, BigUint::zero(), all_ones(m))
            }
            SpecialValue::SmallestPositiveNormal => {
                if layout.max_exponent() < layout.min_exponent() {
                    return Err(Error::Unrepresentable("a normal number"));
                }
                Self::encoded(layout, BigUint::one(), BigUint::zero())
            }
            SpecialValue::LargestNormal => {
                if layout.max_exponent() < layout.min_exponent() {
                    return Err(Error::Unrepresentable("a normal number"));
                }
                Self::encoded(
                    layout,
                    special_exponent(&layout) - BigUint::one(),
                    all_ones(m),
                )
            }
            // Positive finite encodings are ordered like the integers they
            // spell, so the neighbours of one are one's bits minus/plus one
            SpecialValue::One
            | SpecialValue::LargestLessThanOne
            | SpecialValue::SmallestLargerThanOne => {
                if layout.bias() == 0 {
                    return Err(Error::Unrepresentable("one"));
                }
                let one = BigUint::from(layout.bias() as u64) << m;
                let bits = match value {
                    SpecialValue::LargestLessThanOne => one - BigUint::one(),
                    SpecialValue::SmallestLargerThanOne => one + BigUint::one(),
                    _ => one,
                };
                let bits = B::from_biguint(&bits, layout.total_size())
                    .ok_or(Error::Unrepresentable("one"))?;
                Self::from_bit_array(layout, &bits)
            }
        }
    }

    /// Names the value when it is one of the [`SpecialValue`] landmarks.
    /// NaNs are reported with their signaling flag and payload.
    pub fn identify(&self) -> Option<SpecialValue> {
        match self.classify() {
            FloatClass::Zero => return Some(SpecialValue::Zero(self.sign)),
            FloatClass::Infinity => return Some(SpecialValue::Infinity(self.sign)),
            FloatClass::Nan => {
                return Some(SpecialValue::Nan {
                    signaling: self.is_signaling_nan(),
                    payload: self.nan_payload().unwrap_or_default(),
                });
            }
            FloatClass::Subnormal | FloatClass::Normal => {}
        }
        if self.sign {
            return None;
        }

        let (exponent, fraction) = (self.exponent_field(), self.mantissa_field());
        SpecialValue::LANDMARKS.into_iter().find(|landmark| {
            Self::special(self.layout, landmark.clone()).is_ok_and(|candidate| {
                candidate.exponent_field() == exponent && candidate.mantissa_field() == fraction
            })
        })
    }

    fn encoded(layout: Layout, exponent_field: BigUint, mantissa_field: BigUint) -> Result<Self> {
        Self::from_fields(layout, false, &exponent_field, &mantissa_field)
    }
}

fn special_exponent(layout: &Layout) -> BigUint {
    BigUint::from(layout.max_biased_exponent())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::bitarray::DefaultBitArray;

    type Bits = FloatBits<DefaultBitArray>;

    fn bits_of(layout: Layout, value: SpecialValue) -> String {
        Bits::special(layout, value).unwrap().to_bits_string()
    }

    #[rstest]
    #[case(SpecialValue::Zero(true), "10000000000000000000000000000000")]
    #[case(SpecialValue::Infinity(false), "01111111100000000000000000000000")]
    #[case(SpecialValue::Infinity(true), "11111111100000000000000000000000")]
    #[case(SpecialValue::QuietNan, "01111111110000000000000000000000")]
    #[case(SpecialValue::SmallestPositiveSubnormal, "00000000000000000000000000000001")]
    #[case(SpecialValue::LargestSubnormal, "00000000011111111111111111111111")]
    #[case(SpecialValue::SmallestPositiveNormal, "00000000100000000000000000000000")]
    #[case(SpecialValue::LargestNormal, "01111111011111111111111111111111")]
    #[case(SpecialValue::LargestLessThanOne, "00111111011111111111111111111111")]
    #[case(SpecialValue::One, "00111111100000000000000000000000")]
    #[case(SpecialValue::SmallestLargerThanOne, "00111111100000000000000000000001")]
    fn test_single(#[case] value: SpecialValue, #[case] expected: &str) {
        assert_eq!(bits_of(Layout::SINGLE, value.clone()), expected);

        let bits = Bits::from_bits_string(Layout::SINGLE, expected).unwrap();
        match value {
            SpecialValue::QuietNan => assert_eq!(
                bits.identify(),
                Some(SpecialValue::Nan {
                    signaling: false,
                    payload: BigUint::zero(),
                })
            ),
            value => assert_eq!(bits.identify(), Some(value)),
        }
    }

    #[test]
    fn test_double() {
        assert_eq!(
            bits_of(Layout::DOUBLE, SpecialValue::LargestNormal),
            "0111111111101111111111111111111111111111111111111111111111111111"
        );
        assert_eq!(
            bits_of(Layout::DOUBLE, SpecialValue::One),
            "0011111111110000000000000000000000000000000000000000000000000000"
        );
        assert_eq!(
            Bits::special(Layout::DOUBLE, SpecialValue::QuietNan)
                .unwrap()
                .to_hex_string()
                .unwrap(),
            "7FF8000000000000"
        );
    }

    #[test]
    fn test_nan_payloads() {
        let quiet = SpecialValue::Nan {
            signaling: false,
            payload: BigUint::from(1u8),
        };
        assert_eq!(
            bits_of(Layout::SINGLE, quiet),
            "01111111110000000000000000000001"
        );

        let signaling = SpecialValue::Nan {
            signaling: true,
            payload: BigUint::from(5u8),
        };
        let bits = Bits::special(Layout::HALF, signaling.clone()).unwrap();
        assert_eq!(bits.to_bits_string(), "0111110000000101");
        assert!(bits.is_signaling_nan());
        assert_eq!(bits.identify(), Some(signaling));

        assert_eq!(
            Bits::special(
                Layout::HALF,
                SpecialValue::Nan {
                    signaling: true,
                    payload: BigUint::zero(),
                }
            )
            .unwrap_err(),
            Error::Unrepresentable("signaling NaN without payload")
        );
        assert_eq!(
            Bits::special(
                Layout::HALF,
                SpecialValue::Nan {
                    signaling: false,
                    payload: BigUint::from(1u16 << 9),
                }
            )
            .unwrap_err(),
            Error::Unrepresentable("NaN payload")
        );
    }

    #[test]
    fn test_degenerate_layouts() {
        let no_mantissa = Layout::new(1, 4, 0).unwrap();
        assert_eq!(
            Bits::special(no_mantissa, SpecialValue::QuietNan).unwrap_err(),
            Error::Unrepresentable("NaN")
        );
        assert_eq!(
            Bits::special(no_mantissa, SpecialValue::SmallestPositiveSubnormal).unwrap_err(),
            Error::Unrepresentable("a subnormal")
        );
        assert_eq!(bits_of(no_mantissa, SpecialValue::One), "00111");
        assert_eq!(bits_of(no_mantissa, SpecialValue::SmallestLargerThanOne), "01000");

        let no_normals = Layout::new(1, 1, 3).unwrap();
        assert_eq!(
            Bits::special(no_normals, SpecialValue::LargestNormal).unwrap_err(),
            Error::Unrepresentable("a normal number")
        );
        assert_eq!(
            Bits::special(no_normals, SpecialValue::One).unwrap_err(),
            Error::Unrepresentable("one")
        );
    }

    #[test]
    fn test_identify_plain_values() {
        let three = Bits::from_bits_string(Layout::SINGLE, "01000000010000000000000000000000")
            .unwrap();
        assert_eq!(three.identify(), None);

        let negative_one =
            Bits::from_bits_string(Layout::SINGLE, "10111111100000000000000000000000").unwrap();
        assert_eq!(negative_one.identify(), None);
    }
}
