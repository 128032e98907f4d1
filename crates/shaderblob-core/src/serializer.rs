//! Byte sequence to C array initializer text

/// Number of byte literals per line unless configured otherwise
pub const DEFAULT_BYTES_PER_LINE: usize = 15;

/// Render one byte as a zero-padded `0xHH` literal
pub fn hex_literal(byte: u8) -> String {
    format!("0x{byte:02x}")
}

/// Render bytes as the inside of an array initializer
///
/// Every line starts with a newline and a tab, so the body can be dropped
/// straight after an opening brace. Elements are always separated by `", "`,
/// so wrapped lines keep the trailing space the legacy generator emitted.
/// An empty slice yields an empty string.
pub fn serialize_blob(bytes: &[u8], bytes_per_line: usize) -> String {
    let per_line = bytes_per_line.max(1);
    let line_breaks = bytes.len().div_ceil(per_line);
    let mut out = String::with_capacity(bytes.len() * 6 + line_breaks * 2);

    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if i % per_line == 0 {
            out.push_str("\n\t");
        }
        out.push_str(&hex_literal(*byte));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_are_zero_padded() {
        assert_eq!(hex_literal(0), "0x00");
        assert_eq!(hex_literal(0x3e), "0x3e");
        assert_eq!(hex_literal(9), "0x09");
        assert_eq!(hex_literal(255), "0xff");
        assert!((0..=255u8).all(|b| hex_literal(b).len() == 4));
    }

    #[test]
    fn empty_input_has_no_elements() {
        assert_eq!(serialize_blob(&[], DEFAULT_BYTES_PER_LINE), "");
    }

    #[test]
    fn single_byte_has_no_trailing_separator() {
        assert_eq!(serialize_blob(&[0x07], DEFAULT_BYTES_PER_LINE), "\n\t0x07");
    }

    #[test]
    fn thirty_bytes_wrap_into_two_lines() {
        let bytes: Vec<u8> = (0..30).collect();
        let body = serialize_blob(&bytes, DEFAULT_BYTES_PER_LINE);

        assert_eq!(body.matches('\n').count(), 2);
        let lines: Vec<&str> = body.lines().skip(1).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("\t0x00, 0x01"));
        assert!(lines[0].ends_with("0x0e, "));
        assert_eq!(lines[1], "\t0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d");
    }

    #[test]
    fn sixteenth_byte_starts_a_new_line() {
        let body = serialize_blob(&[0xab; 16], DEFAULT_BYTES_PER_LINE);
        assert_eq!(body.matches('\n').count(), 2);
        assert!(body.ends_with(", \n\t0xab"));
        assert!(!body.ends_with(", "));
    }

    #[test]
    fn literal_count_matches_input_length() {
        let bytes = vec![0u8; 1000];
        let body = serialize_blob(&bytes, DEFAULT_BYTES_PER_LINE);
        assert_eq!(body.matches("0x").count(), 1000);
    }

    #[test]
    fn custom_line_width() {
        let body = serialize_blob(&[1, 2, 3, 4], 2);
        assert_eq!(body, "\n\t0x01, 0x02, \n\t0x03, 0x04");
    }

    #[test]
    fn matches_legacy_generator_text() {
        // Byte-for-byte what the legacy generator wrote for 17 bytes
        let bytes: Vec<u8> = (0x30..0x41).collect();
        let expected = "\n\t0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3a, 0x3b, 0x3c, 0x3d, 0x3e, \n\t0x3f, 0x40";
        assert_eq!(serialize_blob(&bytes, DEFAULT_BYTES_PER_LINE), expected);
    }
}
