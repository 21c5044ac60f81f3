use nom_linkcheck::{
    checksum::CHECKSUM_WIDTHS,
    text::{format_checksum_info, text_to_bits},
    ErrorDetector,
};

fn main() {
    let detector = ErrorDetector::new();
    let data = text_to_bits("ABC");
    println!("Data: {data} (ASCII 'A' 'B' 'C')");

    for width in CHECKSUM_WIDTHS {
        let checksum = detector
            .calculate_checksum_with_width(&data, width)
            .expect("Checksum failed");
        print!("\n{width} bit\n{}", format_checksum_info(&checksum, Some(&data)));
    }

    let mut frame = detector.add_checksum(&data).expect("Checksum failed");
    frame.flip(5);
    let valid = detector.verify_checksum(&frame).expect("Verification failed");
    let report = detector
        .verify_checksum_simple(&frame)
        .expect("Verification failed");
    println!(
        "\nAfter flipping bit 5: {} (calculated {}, received {})",
        if valid { "not detected" } else { "error detected" },
        report.calculated,
        report.received
    );
}
