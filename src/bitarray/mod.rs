use std::ops::{Index, Range};

use num_bigint::BigUint;

use crate::error::{Error, Result};

pub mod boolean_list;

pub use boolean_list::BoolBitArray;

pub type DefaultBitArray = BoolBitArray;

/// Fixed-length bit storage, LSB first (index 0 is the least significant bit).
///
/// The textual exchange formats (`'0'`/`'1'` strings and hex) are MSB first,
/// so the string helpers reverse the order on the way in and out.
pub trait BitArray {
    fn from_bytes(bytes: &[u8], n_bits: usize) -> Self
    where
        Self: Sized;
    fn from_bits(bits: &[bool]) -> Self
    where
        Self: Sized,
    {
        let n_bits = bits.len();
        let n_bytes = n_bits.div_ceil(8);
        let mut bytes = vec![0u8; n_bytes];

        for (i, &bit) in bits.iter().enumerate() {
            if bit {
                let byte_index = i / 8;
                let bit_index = i % 8;
                bytes[byte_index] |= 1 << bit_index;
            }
        }

        Self::from_bytes(&bytes, n_bits)
    }

    /// Returns `None` when `value` needs more than `n_bits` bits.
    fn from_biguint(value: &BigUint, n_bits: usize) -> Option<Self>
    where
        Self: Sized,
    {
        if value.bits() > n_bits as u64 {
            return None;
        }
        Some(Self::from_bytes(&value.to_bytes_le(), n_bits))
    }

    /// Parses an MSB-first string of `'0'` and `'1'`.
    fn from_bits_string(s: &str) -> Result<Self>
    where
        Self: Sized,
    {
        let mut bits = Vec::with_capacity(s.len());
        for (position, c) in s.chars().enumerate() {
            match c {
                '0' => bits.push(false),
                '1' => bits.push(true),
                found => {
                    return Err(Error::unexpected(found, position, "'0' or '1'"));
                }
            }
        }
        bits.reverse();
        Ok(Self::from_bits(&bits))
    }

    /// Parses MSB-first hex digits (either case), four bits per digit.
    fn from_hex_string(s: &str) -> Result<Self>
    where
        Self: Sized,
    {
        let mut bits = Vec::with_capacity(s.len() * 4);
        for (position, c) in s.chars().enumerate() {
            let nibble = c
                .to_digit(16)
                .ok_or_else(|| Error::unexpected(c, position, "a hex digit"))?;
            bits.extend((0..4).rev().map(|i| (nibble >> i) & 1 == 1));
        }
        bits.reverse();
        Ok(Self::from_bits(&bits))
    }

    fn zeros(n_bits: usize) -> Self
    where
        Self: Sized,
    {
        let n_bytes = n_bits.div_ceil(8);
        let bytes = vec![0u8; n_bytes];

        Self::from_bytes(&bytes, n_bits)
    }
    fn ones(n_bits: usize) -> Self
    where
        Self: Sized,
    {
        let n_bytes = n_bits.div_ceil(8);
        let mut bytes = vec![0xffu8; n_bytes];

        let last_num_bits = n_bits % 8;
        if last_num_bits > 0 {
            bytes[n_bytes - 1] = (1 << last_num_bits) - 1;
        }

        Self::from_bytes(&bytes, n_bits)
    }

    fn to_bytes(&self) -> Vec<u8>;
    fn to_bits(&self) -> Vec<bool> {
        self.iter_bits().collect()
    }
    /// MSB-first `'0'`/`'1'` rendering, always exactly `len()` characters.
    fn to_bits_string(&self) -> String {
        let mut s: Vec<char> = self
            .iter_bits()
            .map(|b| if b { '1' } else { '0' })
            .collect();
        s.reverse();
        s.into_iter().collect()
    }
    /// MSB-first uppercase hex rendering.
    fn to_hex_string(&self) -> Result<String> {
        if self.len() % 4 != 0 {
            return Err(Error::partial_nibble(self.len()));
        }
        let bits = self.to_bits();
        Ok(bits
            .chunks(4)
            .rev()
            .map(|nibble| {
                let value = nibble
                    .iter()
                    .enumerate()
                    .fold(0u32, |acc, (i, &bit)| acc | (u32::from(bit) << i));
                char::from_digit(value, 16).map_or('0', |c| c.to_ascii_uppercase())
            })
            .collect())
    }
    fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_le(&self.to_bytes())
    }

    fn iter_bits(&self) -> impl Iterator<Item = bool>;

    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&bool>;

    fn get_range(&self, range: Range<usize>) -> Option<Self>
    where
        Self: Sized,
    {
        if range.end > self.len() || range.start > range.end {
            return None;
        }
        let bits: Vec<bool> = self
            .iter_bits()
            .skip(range.start)
            .take(range.len())
            .collect();
        Some(Self::from_bits(&bits))
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn all(&self, value: bool) -> bool {
        self.iter_bits().all(|b| b == value)
    }

    /// Places `self` above `low`: the result's lowest `low.len()` bits are `low`.
    fn concat(&self, low: &Self) -> Self
    where
        Self: Sized,
    {
        let mut bits = low.to_bits();
        bits.extend(self.iter_bits());
        Self::from_bits(&bits)
    }
}

macro_rules! impl_index {
    ($t:ty) => {
        impl Index<usize> for $t {
            type Output = bool;

            fn index(&self, index: usize) -> &Self::Output {
                self.get(index).expect("Index out of bounds")
            }
        }
    };
    () => {};
}

impl_index!(BoolBitArray);
