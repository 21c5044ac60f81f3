use nom_linkcheck::{text::text_to_bits, ErrorDetector};

fn main() {
    let detector = ErrorDetector::new();
    let data = text_to_bits("Hello, link layer");
    let frame = detector.append_crc(&data);
    println!("CRC-32: {}", frame.split_at(data.len()).1);

    for len in [1, 4, 12, 32] {
        let mut corrupted = frame.clone();
        corrupted.flip_range(10, len);
        let remainder = detector.check_crc(&corrupted).expect("CRC failed");
        println!("burst of {len:2} bits -> remainder {remainder:#010x}");
    }

    // two flips on a parity-protected byte go unnoticed
    let mut coded = detector.add_parity(&text_to_bits("H"));
    coded.flip(1);
    coded.flip(2);
    println!("parity after two flips: {}", detector.check_parity(&coded));
}
