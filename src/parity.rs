//! Even parity
//!
//! Detects any odd number of flipped bits. Two (or any even number of) flips
//! cancel out and pass the check.

use crate::bits::BitSequence;

/// Append one bit so the total count of `1`s is even
pub fn add_parity(bits: &BitSequence) -> BitSequence {
    let mut coded = bits.clone();
    coded.push(bits.count_ones() % 2 == 1);
    coded
}

/// `true` when the count of `1`s is even
pub fn check_parity(bits: &BitSequence) -> bool {
    let ok = bits.count_ones() % 2 == 0;
    if !ok {
        log::debug!("parity mismatch over {} bits", bits.len());
    }
    ok
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_bit_values() {
        let odd: BitSequence = "0100000".parse().unwrap();
        let even: BitSequence = "0100001".parse().unwrap();
        assert_eq!(add_parity(&odd).to_string(), "01000001");
        assert_eq!(add_parity(&even).to_string(), "01000010");
    }

    #[test]
    fn parity_of_empty() {
        let coded = add_parity(&BitSequence::new());
        assert_eq!(coded.to_string(), "0");
        assert!(check_parity(&coded));
    }

    #[test]
    fn single_flip_detected() {
        let mut coded = add_parity(&BitSequence::from_bytes(b"H"));
        assert!(check_parity(&coded));
        coded.flip(3);
        assert!(!check_parity(&coded));
    }

    #[test]
    fn double_flip_undetected() {
        let mut coded = add_parity(&BitSequence::from_bytes(b"H"));
        coded.flip(1);
        coded.flip(6);
        assert!(check_parity(&coded));
    }
}
