//! Utility functions for syno-iscsi

const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];
const THRESHOLD: u64 = 1024;

/// Format bytes using the largest binary unit that keeps the value at or
/// above one, with two decimals.
pub fn readable_byte_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0.00 B".to_string();
    }

    let mut unit_index = 0;
    let mut remaining = bytes;
    while remaining >= THRESHOLD && unit_index < UNITS.len() - 1 {
        remaining /= THRESHOLD;
        unit_index += 1;
    }

    let scaled = bytes as f64 / (THRESHOLD as f64).powi(unit_index as i32);
    format!("{:.2} {}", scaled, UNITS[unit_index])
}

/// Parse a string-encoded byte count.
pub fn parse_bytes(value: &str) -> Option<u64> {
    value.parse().ok()
}
