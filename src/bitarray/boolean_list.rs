use std::ops::Range;

use crate::bitarray::BitArray;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoolBitArray {
    bits: Vec<bool>,
}

impl BitArray for BoolBitArray {
    fn from_bits(bits: &[bool]) -> Self
    where
        Self: Sized,
    {
        Self {
            bits: bits.to_vec(),
        }
    }

    // [7, 1], 9 -> [1, 1, 1, 0, 0, 0, 0, 0, 1]
    fn from_bytes(bytes: &[u8], n_bits: usize) -> Self
    where
        Self: Sized,
    {
        let bits = (0..n_bits)
            .map(|i| {
                bytes
                    .get(i / 8)
                    .is_some_and(|byte| (byte >> (i % 8)) & 1 == 1)
            })
            .collect();
        Self { bits }
    }

    fn zeros(n_bits: usize) -> Self
    where
        Self: Sized,
    {
        Self {
            bits: vec![false; n_bits],
        }
    }

    fn ones(n_bits: usize) -> Self
    where
        Self: Sized,
    {
        Self {
            bits: vec![true; n_bits],
        }
    }

    fn to_bits(&self) -> Vec<bool> {
        self.bits.clone()
    }

    fn to_bits_string(&self) -> String {
        self.bits
            .iter()
            .rev()
            .map(|&b| if b { '1' } else { '0' })
            .collect()
    }

    fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.bits.len().div_ceil(8)];

        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                bytes[i / 8] |= 1 << (i % 8);
            }
        }

        bytes
    }

    fn iter_bits(&self) -> impl Iterator<Item = bool> {
        self.bits.iter().copied()
    }

    fn len(&self) -> usize {
        self.bits.len()
    }

    fn get(&self, index: usize) -> Option<&bool> {
        self.bits.get(index)
    }

    fn get_range(&self, range: Range<usize>) -> Option<Self>
    where
        Self: Sized,
    {
        self.bits.get(range).map(Self::from_bits)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use rstest::rstest;

    use super::super::tests::*;
    use super::*;
    use crate::error::Error;
    use crate::tests::*;

    #[rstest]
    fn test_from_bits(mut rng: impl Rng, n_experiments: usize) {
        let bits = vec![true, false, true, true, false];
        let bit_array = BoolBitArray::from_bits(&bits);
        assert_eq!(bit_array.bits, bits);

        for _ in 0..n_experiments {
            let len = rng.random_range(1..100);
            let bits = random_bits(&mut rng, len);
            let bit_array = BoolBitArray::from_bits(&bits);
            assert_eq!(bit_array.to_bits(), bits);
        }
    }

    #[rstest]
    fn test_bytes(mut rng: impl Rng, n_experiments: usize) {
        let bytes = vec![0b00001111, 0b10101010];
        let expected_bits = vec![
            true, true, true, true, false, false, false, false, false, true, false, true,
        ];
        let bit_array = BoolBitArray::from_bytes(&bytes, 12);
        assert_eq!(bit_array.bits, expected_bits);
        assert_eq!(bit_array.to_bytes(), vec![0b00001111, 0b00001010]);

        // Asking for more bits than given pads with zeros
        let bit_array = BoolBitArray::from_bytes(&[0xff], 10);
        assert_eq!(bit_array.to_bits_string(), "0011111111");

        for _ in 0..n_experiments {
            let len = rng.random_range(1..100);
            let bytes = random_bytes(&mut rng, len);
            let bit_array = BoolBitArray::from_bytes(&bytes, len * 8);
            assert_eq!(bit_array.to_bytes(), bytes);
        }
    }

    #[test]
    fn test_zeros_and_ones() {
        let zeros = BoolBitArray::zeros(10);
        assert!(zeros.all(false));
        assert_eq!(zeros.len(), 10);

        let ones = BoolBitArray::ones(13);
        assert!(ones.all(true));
        assert_eq!(ones.to_bytes(), vec![0xff, 0b0001_1111]);

        assert!(BoolBitArray::zeros(0).is_empty());
    }

    #[rstest]
    fn test_bits_string(mut rng: impl Rng, n_experiments: usize) {
        let bit_array = BoolBitArray::from_bits_string("0011").unwrap();
        assert_eq!(bit_array.bits, vec![true, true, false, false]);
        assert!(bit_array[0]);
        assert!(!bit_array[3]);
        assert_eq!(bit_array.to_bits_string(), "0011");

        assert_eq!(
            BoolBitArray::from_bits_string("01x1").unwrap_err(),
            Error::unexpected('x', 2, "'0' or '1'")
        );

        for _ in 0..n_experiments {
            let len = rng.random_range(1..300);
            let s = random_bits_string(&mut rng, len);
            let bit_array = BoolBitArray::from_bits_string(&s).unwrap();
            assert_eq!(bit_array.to_bits(), string_to_bits(&s));
            assert_eq!(bit_array.to_bits_string(), s);
        }
    }

    #[test]
    fn test_hex_string() {
        let bit_array = BoolBitArray::from_hex_string("3fC0").unwrap();
        assert_eq!(bit_array.to_bits_string(), "0011111111000000");
        assert_eq!(bit_array.to_hex_string().unwrap(), "3FC0");

        let bit_array = BoolBitArray::from_bits_string("000010100101").unwrap();
        assert_eq!(bit_array.to_hex_string().unwrap(), "0A5");

        assert_eq!(
            BoolBitArray::from_hex_string("12G4").unwrap_err(),
            Error::unexpected('G', 2, "a hex digit")
        );
        assert_eq!(
            BoolBitArray::zeros(19).to_hex_string().unwrap_err(),
            Error::partial_nibble(19)
        );
    }

    #[rstest]
    fn test_biguint(mut rng: impl Rng, n_experiments: usize) {
        let bit_array = BoolBitArray::from_biguint(&BigUint::from(0x1234u16), 16).unwrap();
        assert_eq!(bit_array.to_bits_string(), "0001001000110100");
        assert_eq!(bit_array.to_biguint(), BigUint::from(0x1234u16));

        // Fixed width keeps the leading zeros
        let bit_array = BoolBitArray::from_biguint(&BigUint::from(5u8), 7).unwrap();
        assert_eq!(bit_array.to_bits_string(), "0000101");

        assert!(BoolBitArray::from_biguint(&BigUint::from(8u8), 3).is_none());
        assert!(BoolBitArray::from_biguint(&BigUint::from(0u8), 0).is_some());

        for _ in 0..n_experiments {
            let n_bits = rng.random_range(1..200);
            let value = random_biguint(&mut rng, n_bits);
            let bit_array = BoolBitArray::from_biguint(&value, n_bits).unwrap();
            assert_eq!(bit_array.len(), n_bits);
            assert_eq!(bit_array.to_biguint(), value);
        }
    }

    #[test]
    fn test_range_and_concat() {
        let bit_array = BoolBitArray::from_bits_string("1011001").unwrap();
        // LSB-first ranges: bits 0..3 are the last three characters
        assert_eq!(bit_array.get_range(0..3).unwrap().to_bits_string(), "001");
        assert_eq!(bit_array.get_range(3..7).unwrap().to_bits_string(), "1011");
        assert!(bit_array.get_range(3..8).is_none());

        let high = BoolBitArray::from_bits_string("10").unwrap();
        let low = BoolBitArray::from_bits_string("0011").unwrap();
        assert_eq!(high.concat(&low).to_bits_string(), "100011");
    }
}
