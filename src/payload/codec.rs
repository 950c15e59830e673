//! Payload encode/decode with staged validation.

use super::checksum::payload_checksum;
use serde::Deserialize;
use thiserror::Error;

/// Fixed source tag identifying payloads produced by this scheme.
///
/// Decoding rejects any payload carrying a different tag, so QR codes from
/// unrelated systems never register as scan results.
pub const SOURCE_TAG: &str = "lablup-inventory";

/// Wire form of a generated QR payload.
///
/// Fields default to empty on deserialization so that a structurally valid
/// JSON object with missing fields is reported as [`DecodeError::MissingFields`]
/// rather than a parse failure.
#[derive(Debug, Deserialize)]
struct Payload {
    #[serde(default)]
    s: String,
    #[serde(default)]
    src: String,
    #[serde(default)]
    cs: String,
}

/// Reasons a scanned string is rejected by [`decode`].
///
/// The variants mirror the validation stages in order: structure, field
/// presence, source tag, checksum. Earlier stages are cheaper, so clearly
/// foreign content is rejected before any checksum work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The raw text is not a JSON object.
    #[error("payload is not structured text")]
    NotStructured,
    /// One or more of the `s`, `src`, `cs` fields is absent or empty.
    #[error("payload is missing required fields")]
    MissingFields,
    /// The payload carries a source tag from another scheme.
    #[error("unknown payload source: {0:?}")]
    UnknownSource(String),
    /// The embedded checksum does not match the recomputed one.
    #[error("checksum mismatch: expected {expected}, got {got}")]
    ChecksumMismatch {
        /// Checksum recomputed over the payload contents.
        expected: String,
        /// Checksum embedded in the payload.
        got: String,
    },
}

/// Encodes a serial number into checksummed QR payload text.
pub fn encode(serial: &str) -> String {
    serde_json::json!({
        "s": serial,
        "src": SOURCE_TAG,
        "cs": payload_checksum(serial, SOURCE_TAG),
    })
    .to_string()
}

/// Decodes and validates scanned text, returning the serial number.
///
/// Validation runs in four stages and stops at the first failure:
/// JSON structure, field presence, source tag, checksum.
pub fn decode(raw: &str) -> Result<String, DecodeError> {
    let payload: Payload =
        serde_json::from_str(raw).map_err(|_| DecodeError::NotStructured)?;

    if payload.s.is_empty() || payload.src.is_empty() || payload.cs.is_empty() {
        return Err(DecodeError::MissingFields);
    }

    if payload.src != SOURCE_TAG {
        return Err(DecodeError::UnknownSource(payload.src));
    }

    let expected = payload_checksum(&payload.s, &payload.src);
    if payload.cs != expected {
        return Err(DecodeError::ChecksumMismatch {
            expected,
            got: payload.cs,
        });
    }

    Ok(payload.s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_trip() {
        let text = encode("SN-42");
        assert_eq!(decode(&text).unwrap(), "SN-42");
    }

    #[test]
    fn test_round_trip_unicode_serial() {
        let text = encode("箱-042/β");
        assert_eq!(decode(&text).unwrap(), "箱-042/β");
    }

    #[test]
    fn test_encoded_shape() {
        let text = encode("SN-42");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["s"], "SN-42");
        assert_eq!(value["src"], SOURCE_TAG);
        assert_eq!(value["cs"].as_str().unwrap().len(), 8);
    }

    #[test]
    fn test_not_json_rejected() {
        assert_eq!(decode("not json"), Err(DecodeError::NotStructured));
    }

    #[test]
    fn test_foreign_object_rejected() {
        assert_eq!(decode(r#"{"not":"ours"}"#), Err(DecodeError::MissingFields));
    }

    #[test]
    fn test_empty_fields_rejected() {
        assert_eq!(
            decode(r#"{"s":"","src":"lablup-inventory","cs":"deadbeef"}"#),
            Err(DecodeError::MissingFields)
        );
    }

    #[test]
    fn test_wrong_source_rejected() {
        let text = encode("SN-42").replace("lablup-inventory", "someone-else");
        assert!(matches!(decode(&text), Err(DecodeError::UnknownSource(_))));
    }

    #[test]
    fn test_tampered_serial_rejected() {
        let text = encode("SN-42").replace("SN-42", "SN-43");
        assert!(matches!(
            decode(&text),
            Err(DecodeError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_tampered_checksum_rejected() {
        let text = encode("SN-42");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let cs = value["cs"].as_str().unwrap();
        // Flip the first checksum digit.
        let flipped = if cs.starts_with('0') { "1" } else { "0" };
        let tampered = text.replace(cs, &format!("{}{}", flipped, &cs[1..]));
        assert!(matches!(
            decode(&tampered),
            Err(DecodeError::ChecksumMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_round_trip_printable_serials(serial in "[ -~]{1,64}") {
            let text = encode(&serial);
            prop_assert_eq!(decode(&text).unwrap(), serial);
        }
    }
}
