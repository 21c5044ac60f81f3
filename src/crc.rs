//! Cyclic redundancy check by modulo-2 polynomial long division
//!
//! Plain MSB-first division with a zero initial register and no final XOR:
//! the CRC of `data` is the remainder of `data · x^n` divided by the
//! generator, and a received `data ++ crc` frame divides to zero.

use crate::{
    bits::BitSequence,
    error::{Error, Result},
    parser::bits_value,
    polynomial::Polynomial,
};

/// Remainder of `dividend` divided by `generator` over GF(2)
///
/// Works on a private copy of the dividend. Wherever the leading bit of the
/// current window is `1` the generator is XORed into it; what is left in the
/// last `degree` bits is the remainder.
///
/// # Errors
///
/// [`Error::InvalidInputLength`] if the dividend holds fewer than `degree`
/// bits. A dividend of exactly `degree` bits is its own remainder.
pub fn divide(dividend: &BitSequence, generator: &Polynomial) -> Result<BitSequence> {
    let degree = generator.degree();
    if dividend.len() < degree {
        return Err(Error::InvalidInputLength {
            required: degree,
            actual: dividend.len(),
        });
    }

    Ok(reduce(dividend.as_slice().to_vec(), generator))
}

/// Division on an owned working buffer of at least `degree` bits
fn reduce(mut work: Vec<u8>, generator: &Polynomial) -> BitSequence {
    let degree = generator.degree();
    debug_assert!(work.len() >= degree);

    let divisor = generator.as_slice();
    let steps = (work.len() + 1).saturating_sub(divisor.len());
    for i in 0..steps {
        if work[i] == 1 {
            work[i..i + divisor.len()]
                .iter_mut()
                .zip(divisor)
                .for_each(|(bit, coefficient)| *bit ^= coefficient);
        }
    }

    let remainder = work.split_off(work.len() - degree);
    log::trace!(
        "divided {} bits by degree {} generator, remainder {:?}",
        work.len() + degree,
        degree,
        remainder
    );
    BitSequence::from_raw(remainder)
}

/// CRC generator/checker bound to one generator polynomial
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Crc {
    polynomial: Polynomial,
}

impl Crc {
    pub fn new(polynomial: Polynomial) -> Self {
        Self { polynomial }
    }

    pub fn polynomial(&self) -> &Polynomial {
        &self.polynomial
    }

    /// Number of check bits appended to a frame
    pub fn width(&self) -> usize {
        self.polynomial.degree()
    }

    /// Compute the CRC of `data` for transmission
    ///
    /// Always exactly [`Crc::width`] bits, leading zeros included. The
    /// zero padding covers the degree, so any data length is accepted.
    pub fn generate(&self, data: &BitSequence) -> BitSequence {
        let padded = data.concat(&BitSequence::zeros(self.width()));
        reduce(padded.as_slice().to_vec(), &self.polynomial)
    }

    /// `data ++ generate(data)`
    pub fn append(&self, data: &BitSequence) -> BitSequence {
        data.concat(&self.generate(data))
    }

    /// Divide a received frame (data followed by its CRC)
    ///
    /// Returns the remainder as an integer: `0` when no error is detected,
    /// anything else means the frame was corrupted.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInputLength`] if the frame is shorter than the CRC.
    pub fn check(&self, frame: &BitSequence) -> Result<u64> {
        let remainder = bits_value(divide(frame, &self.polynomial)?.as_slice());
        if remainder != 0 {
            log::debug!(
                "CRC mismatch on {} bit frame, remainder {:#x}",
                frame.len(),
                remainder
            );
        }
        Ok(remainder)
    }

    /// `check(frame) == 0`
    pub fn verify(&self, frame: &BitSequence) -> Result<bool> {
        Ok(self.check(frame)? == 0)
    }
}
