use crate::{
    bits::BitSequence,
    checksum::{self, validate_width, ChecksumVerification, DEFAULT_CHECKSUM_WIDTH},
    crc::Crc,
    error::Result,
    parity,
    polynomial::Polynomial,
};

/// Fixed settings of an [`ErrorDetector`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectorConfig {
    /// CRC generator
    pub polynomial: Polynomial,
    /// Word width used when a checksum call does not name one
    pub checksum_width: u32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            polynomial: Polynomial::crc32(),
            checksum_width: DEFAULT_CHECKSUM_WIDTH,
        }
    }
}

/// Parity, checksum and CRC behind one configured value
///
/// Holds nothing but its configuration, so a single instance can be shared
/// between threads by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetector {
    crc: Crc,
    checksum_width: u32,
}

impl Default for ErrorDetector {
    fn default() -> Self {
        Self {
            crc: Crc::default(),
            checksum_width: DEFAULT_CHECKSUM_WIDTH,
        }
    }
}

impl ErrorDetector {
    /// CRC-32 and 16-bit checksums
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// [`crate::Error::InvalidWidth`] if the configured checksum width is
    /// unusable.
    pub fn with_config(config: DetectorConfig) -> Result<Self> {
        validate_width(config.checksum_width)?;
        Ok(Self {
            crc: Crc::new(config.polynomial),
            checksum_width: config.checksum_width,
        })
    }

    /// Replace the CRC generator
    pub fn with_polynomial(mut self, polynomial: Polynomial) -> Self {
        self.crc = Crc::new(polynomial);
        self
    }

    /// Replace the default checksum width
    pub fn with_checksum_width(mut self, checksum_width: u32) -> Result<Self> {
        validate_width(checksum_width)?;
        self.checksum_width = checksum_width;
        Ok(self)
    }

    pub fn config(&self) -> DetectorConfig {
        DetectorConfig {
            polynomial: self.crc.polynomial().clone(),
            checksum_width: self.checksum_width,
        }
    }

    pub fn polynomial(&self) -> &Polynomial {
        self.crc.polynomial()
    }

    pub fn checksum_width(&self) -> u32 {
        self.checksum_width
    }

    pub fn add_parity(&self, bits: &BitSequence) -> BitSequence {
        parity::add_parity(bits)
    }

    pub fn check_parity(&self, bits: &BitSequence) -> bool {
        parity::check_parity(bits)
    }

    /// CRC of `data`, as many bits as the generator's degree
    pub fn generate_crc(&self, data: &BitSequence) -> BitSequence {
        self.crc.generate(data)
    }

    pub fn append_crc(&self, data: &BitSequence) -> BitSequence {
        self.crc.append(data)
    }

    /// Remainder of a received frame, `0` if no error was detected
    pub fn check_crc(&self, frame: &BitSequence) -> Result<u64> {
        self.crc.check(frame)
    }

    pub fn verify_crc(&self, frame: &BitSequence) -> Result<bool> {
        self.crc.verify(frame)
    }

    pub fn calculate_checksum(&self, data: &BitSequence) -> Result<BitSequence> {
        checksum::calculate_checksum(data, self.checksum_width)
    }

    pub fn calculate_checksum_with_width(&self, data: &BitSequence, width: u32) -> Result<BitSequence> {
        checksum::calculate_checksum(data, width)
    }

    pub fn add_checksum(&self, data: &BitSequence) -> Result<BitSequence> {
        checksum::add_checksum(data, self.checksum_width)
    }

    pub fn add_checksum_with_width(&self, data: &BitSequence, width: u32) -> Result<BitSequence> {
        checksum::add_checksum(data, width)
    }

    pub fn verify_checksum(&self, frame: &BitSequence) -> Result<bool> {
        checksum::verify_checksum(frame, self.checksum_width)
    }

    pub fn verify_checksum_with_width(&self, frame: &BitSequence, width: u32) -> Result<bool> {
        checksum::verify_checksum(frame, width)
    }

    pub fn verify_checksum_simple(&self, frame: &BitSequence) -> Result<ChecksumVerification> {
        checksum::verify_checksum_simple(frame, self.checksum_width)
    }

    pub fn verify_checksum_simple_with_width(
        &self,
        frame: &BitSequence,
        width: u32,
    ) -> Result<ChecksumVerification> {
        checksum::verify_checksum_simple(frame, width)
    }
}
