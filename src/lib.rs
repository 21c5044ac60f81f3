#![doc = include_str!("../README.md")]
mod bits;
pub mod checksum;
pub mod crc;
mod detector;
mod error;
pub mod parity;
pub mod parser;
mod polynomial;
pub mod text;

pub use bits::BitSequence;
pub use checksum::{
    add_checksum, calculate_checksum, verify_checksum, verify_checksum_simple, ChecksumVerification,
};
pub use crc::{divide, Crc};
pub use detector::{DetectorConfig, ErrorDetector};
pub use error::{Error, Result};
pub use parity::{add_parity, check_parity};
pub use polynomial::{Polynomial, CRC32_POLYNOMIAL};

/// CRC-32 of `data` with the IEEE 802.3 generator
///
/// Unreflected, zero initial register, no final XOR: the 32 bits that make
/// `data ++ crc` divide to zero.
pub fn crc32(data: &BitSequence) -> BitSequence {
    Crc::default().generate(data)
}
