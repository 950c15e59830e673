//! CRC-32 checksum over payload contents.
//!
//! Standard IEEE CRC-32: reflected, table-driven, polynomial 0xEDB88320,
//! initial value and final XOR of 0xFFFFFFFF. The rendered form is fixed
//! by the wire format: 8 lowercase hex digits, zero-padded.

/// Reflected IEEE CRC-32 polynomial.
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Lookup table for byte-at-a-time CRC updates.
static CRC_TABLE: [u32; 256] = build_table();

const fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLYNOMIAL
            } else {
                crc >> 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Computes the CRC-32 of `data`.
pub(crate) fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        let index = ((crc ^ byte as u32) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC_TABLE[index];
    }
    crc ^ 0xFFFF_FFFF
}

/// Renders the payload checksum over the exact concatenation
/// `serial + source` (no separator) as 8 lowercase hex digits.
pub(crate) fn payload_checksum(serial: &str, source: &str) -> String {
    let mut data = Vec::with_capacity(serial.len() + source.len());
    data.extend_from_slice(serial.as_bytes());
    data.extend_from_slice(source.as_bytes());
    format!("{:08x}", crc32(&data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_check_value() {
        // Published check value for the IEEE polynomial.
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn test_checksum_is_zero_padded_hex() {
        let rendered = payload_checksum("", "");
        assert_eq!(rendered, "00000000");

        let rendered = payload_checksum("BOX-1", "lablup-inventory");
        assert_eq!(rendered.len(), 8);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(rendered, rendered.to_lowercase());
    }

    #[test]
    fn test_concatenation_has_no_separator() {
        // ("ab", "c") and ("a", "bc") concatenate to the same bytes.
        assert_eq!(payload_checksum("ab", "c"), payload_checksum("a", "bc"));
    }

    #[test]
    fn test_single_byte_sensitivity() {
        assert_ne!(payload_checksum("BOX-1", "src"), payload_checksum("BOX-2", "src"));
    }
}
