//! Text helpers around the detection schemes
//!
//! Characters travel as their code point, at least 8 bits each, most
//! significant bit first.

use nom::multi::many0;

use crate::{bits::BitSequence, checksum::calculate_checksum, parser::octet};

/// Encode each character of `text` from its code point
///
/// Code points up to U+00FF take exactly 8 bits and decode back with
/// [`bits_to_text`]. Wider ones use as many bits as the code point needs,
/// so they do not round-trip.
pub fn text_to_bits(text: &str) -> BitSequence {
    let mut bits = BitSequence::new();
    for c in text.chars() {
        let code = u32::from(c);
        let width = (u32::BITS - code.leading_zeros()).max(8) as usize;
        bits.extend_from(&BitSequence::from_value(u128::from(code), width));
    }
    bits
}

/// Decode 8-bit character codes back into text
///
/// A trailing partial byte is dropped and NUL bytes are skipped as padding,
/// so payloads that carry a zero byte do not round-trip. Every other byte
/// becomes the character with that code point.
pub fn bits_to_text(bits: &BitSequence) -> String {
    let bytes = match many0(octet)(bits.as_slice()) {
        Ok((_, bytes)) => bytes,
        Err(_) => Vec::new(),
    };
    bytes
        .into_iter()
        .filter(|&byte| byte != 0)
        .map(char::from)
        .collect()
}

/// Human readable summary of a checksum
///
/// With `data`, the checksum is recomputed with the same width and the
/// result is reported as `OK` or `INVALID`. Only 8, 16 and 32 bit checksums
/// are described.
pub fn format_checksum_info(checksum: &BitSequence, data: Option<&BitSequence>) -> String {
    let width = checksum.len();
    if ![8, 16, 32].contains(&width) {
        return format!("Invalid checksum: {checksum} ({width} bits)");
    }

    let value = checksum.to_u64().unwrap_or_default();
    let mut info = format!(
        "Checksum: {checksum}\n  Decimal: {value}\n  Hexadecimal: 0x{value:0digits$X}\n",
        digits = width / 4
    );
    if let Some(data) = data {
        let verdict = match calculate_checksum(data, width as u32) {
            Ok(calculated) if &calculated == checksum => "OK",
            _ => "INVALID",
        };
        info.push_str(&format!("  Verification: {verdict}\n"));
    }
    info
}
