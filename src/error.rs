//! Error type shared by every detection scheme.
//!
//! Only configuration and input-shape problems are errors. A corrupted frame
//! is a normal outcome and is reported through the return value of the
//! verification functions (`false` or a non-zero CRC remainder).

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    /// The input holds fewer bits than the operation needs
    #[error("input too short: need at least {required} bits, got {actual}")]
    InvalidInputLength { required: usize, actual: usize },

    /// Checksum width outside `1..=64`
    #[error("invalid checksum width: {0} bits")]
    InvalidWidth(u32),

    /// Generator polynomial without a leading 1 or with an unsupported degree
    #[error("invalid generator polynomial: {0}")]
    InvalidPolynomial(String),

    /// A bit string contained something other than `0` or `1`
    ///
    /// `position` is the index of the offending character, counted in
    /// characters rather than bytes.
    #[error("invalid bit string: unexpected {found:?} at position {position}")]
    InvalidBitString { position: usize, found: char },
}

pub type Result<T> = std::result::Result<T, Error>;
