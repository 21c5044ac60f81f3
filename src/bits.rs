use std::{fmt, str::FromStr};

use nom::Finish;

use crate::{
    error::{Error, Result},
    parser::{bit_string, bits_value},
};

/// Owned sequence of bits, most significant first
///
/// Each element of the backing buffer is either `0` or `1`, which lets the
/// nom parsers in [`crate::parser`] walk it one bit per input item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitSequence {
    bits: Vec<u8>,
}

impl BitSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// `len` zero bits
    pub fn zeros(len: usize) -> Self {
        Self::from_raw(vec![0; len])
    }

    /// Trusts `bits` to only hold `0` and `1`
    pub(crate) fn from_raw(bits: Vec<u8>) -> Self {
        debug_assert!(bits.iter().all(|&b| b <= 1));
        Self { bits }
    }

    /// Expands every byte into 8 bits, most significant bit first
    pub fn from_bytes(bytes: &[u8]) -> Self {
        bytes
            .iter()
            .flat_map(|&byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
            .collect()
    }

    /// The low `width` bits of `value`, left-padded with zeros
    pub fn from_value(value: u128, width: usize) -> Self {
        (0..width)
            .rev()
            .map(|shift| shift < 128 && (value >> shift) & 1 == 1)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    pub fn get(&self, index: usize) -> Option<bool> {
        self.bits.get(index).map(|&b| b == 1)
    }

    /// Raw view, one `0`/`1` byte per bit
    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().map(|&b| b == 1)
    }

    pub fn push(&mut self, bit: bool) {
        self.bits.push(u8::from(bit));
    }

    pub fn extend_from(&mut self, other: &BitSequence) {
        self.bits.extend_from_slice(&other.bits);
    }

    /// `self ++ other` as a new sequence
    pub fn concat(&self, other: &BitSequence) -> BitSequence {
        let mut bits = Vec::with_capacity(self.len() + other.len());
        bits.extend_from_slice(&self.bits);
        bits.extend_from_slice(&other.bits);
        Self::from_raw(bits)
    }

    /// Splits into `[0, mid)` and `[mid, len)`
    ///
    /// # Panics
    ///
    /// If `mid > len`, as [`slice::split_at`].
    pub fn split_at(&self, mid: usize) -> (BitSequence, BitSequence) {
        let (head, tail) = self.bits.split_at(mid);
        (Self::from_raw(head.to_vec()), Self::from_raw(tail.to_vec()))
    }

    /// Inverts the bit at `index`, simulating a transmission error
    ///
    /// # Panics
    ///
    /// If `index` is out of bounds.
    pub fn flip(&mut self, index: usize) {
        self.bits[index] ^= 1;
    }

    /// Inverts `len` contiguous bits starting at `start`
    ///
    /// # Panics
    ///
    /// If the range runs past the end of the sequence.
    pub fn flip_range(&mut self, start: usize, len: usize) {
        self.bits[start..start + len].iter_mut().for_each(|b| *b ^= 1);
    }

    /// Unsigned value of the sequence, `None` above 64 bits
    pub fn to_u64(&self) -> Option<u64> {
        (self.len() <= 64).then(|| bits_value(&self.bits))
    }
}

impl FromIterator<bool> for BitSequence {
    fn from_iter<T: IntoIterator<Item = bool>>(iter: T) -> Self {
        Self::from_raw(iter.into_iter().map(u8::from).collect())
    }
}

impl fmt::Display for BitSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit == 1 { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitSequence {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match nom::combinator::all_consuming(bit_string)(s).finish() {
            Ok((_, bits)) => Ok(bits),
            Err(e) => Err(Error::InvalidBitString {
                position: s[..s.len() - e.input.len()].chars().count(),
                found: e.input.chars().next().unwrap_or_default(),
            }),
        }
    }
}

impl<'a> TryFrom<&'a str> for BitSequence {
    type Error = Error;

    fn try_from(value: &'a str) -> Result<Self> {
        value.parse()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for BitSequence {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for BitSequence {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
