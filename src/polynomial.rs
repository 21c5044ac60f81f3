use std::{fmt, str::FromStr};

use crate::{
    bits::BitSequence,
    error::{Error, Result},
};

/// IEEE 802.3 (Ethernet) CRC-32 generator, `x^32` term included
pub const CRC32_POLYNOMIAL: u128 = 0x1_04C1_1DB7;

/// Highest supported generator degree, remainders must fit a `u64`
pub const MAX_DEGREE: usize = 64;

/// CRC generator polynomial
///
/// A degree `n` polynomial is stored as its `n + 1` coefficients, highest
/// first, so the leading bit is always `1`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Polynomial {
    coefficients: BitSequence,
}

impl Polynomial {
    /// Build from explicit coefficients, highest degree first
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPolynomial`] if the leading coefficient is not `1` or
    /// the degree is outside `1..=64`.
    pub fn new(coefficients: BitSequence) -> Result<Self> {
        match coefficients.get(0) {
            None => return Err(Error::InvalidPolynomial("no coefficients".into())),
            Some(false) => {
                return Err(Error::InvalidPolynomial(format!(
                    "leading coefficient of {coefficients} is 0"
                )))
            }
            Some(true) => {}
        }
        let degree = coefficients.len() - 1;
        if !(1..=MAX_DEGREE).contains(&degree) {
            return Err(Error::InvalidPolynomial(format!(
                "degree {degree} outside 1..={MAX_DEGREE}"
            )));
        }
        Ok(Self { coefficients })
    }

    /// Build from the integer form, e.g. `0x104C11DB7`
    pub fn from_u128(value: u128) -> Result<Self> {
        let width = (u128::BITS - value.leading_zeros()) as usize;
        Self::new(BitSequence::from_value(value, width))
    }

    /// The standard CRC-32 generator
    pub fn crc32() -> Self {
        Self {
            coefficients: BitSequence::from_value(CRC32_POLYNOMIAL, 33),
        }
    }

    /// Also the width of the remainder it produces
    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    pub fn as_slice(&self) -> &[u8] {
        self.coefficients.as_slice()
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::crc32()
    }
}

impl TryFrom<BitSequence> for Polynomial {
    type Error = Error;

    fn try_from(value: BitSequence) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.coefficients, f)
    }
}

impl FromStr for Polynomial {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s.parse()?)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Polynomial {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.coefficients, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Polynomial {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let coefficients = <BitSequence as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(coefficients).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crc32_generator() {
        let poly = Polynomial::crc32();
        assert_eq!(poly.degree(), 32);
        assert_eq!(poly.to_string(), "100000100110000010001110110110111");
        assert_eq!(Polynomial::from_u128(CRC32_POLYNOMIAL).unwrap(), poly);
    }

    #[test]
    fn parse_generator() {
        let poly: Polynomial = "1011".parse().unwrap();
        assert_eq!(poly.degree(), 3);
        assert_eq!(Polynomial::from_u128(0b1011).unwrap(), poly);
    }

    #[test]
    fn reject_leading_zero() {
        assert!(matches!(
            "0101".parse::<Polynomial>(),
            Err(Error::InvalidPolynomial(_))
        ));
    }

    #[test]
    fn reject_degenerate_degrees() {
        assert!(matches!(Polynomial::from_u128(0), Err(Error::InvalidPolynomial(_))));
        assert!(matches!(Polynomial::from_u128(1), Err(Error::InvalidPolynomial(_))));
        assert!(matches!(
            Polynomial::from_u128(1 << 65),
            Err(Error::InvalidPolynomial(_))
        ));
        assert_eq!(Polynomial::from_u128(1 << 64).unwrap().degree(), 64);
    }

    #[test]
    fn reject_bad_characters() {
        assert!(matches!(
            "10a1".parse::<Polynomial>(),
            Err(Error::InvalidBitString { position: 2, found: 'a' })
        ));
    }
}
