//! Binary codec for the Samsung remote-control frames.
//!
//! Wire format of every frame, in both directions:
//! ```text
//! [0x00][app_len:1][0x00][app:app_len][payload_len:1][0x00][payload:payload_len]
//! ```
//! The byte after each length is the high byte of a little-endian `u16`.  No
//! frame in use needs more than 255 bytes, so the high byte is always written
//! as zero and ignored on decode; inputs that would need it are rejected.
//!
//! String fields inside payloads are base64-encoded and framed the same way:
//! `[len:1][0x00][base64:len]`.

use thiserror::Error;
use tracing::trace;

use crate::protocol::base64;
use crate::protocol::outcome::{classify_payload, ResponseOutcome};

/// Application string tagging the handshake frame.
pub const HANDSHAKE_APP_STRING: &str = "iphone..iapp.samsung";

/// Model-identifying application string tagging the command frame.
pub const COMMAND_APP_STRING: &str = "iphone.UN60D6000.iapp.samsung";

/// First two payload bytes of a handshake frame.
pub const HANDSHAKE_DISCRIMINATOR: [u8; 2] = [0x64, 0x00];

/// First three payload bytes of a command frame.
pub const COMMAND_PREFIX: [u8; 3] = [0x00, 0x00, 0x00];

/// Largest value a single-byte length field can carry.
pub const MAX_FIELD_LEN: usize = u8::MAX as usize;

/// Bytes before the application string: marker, length, reserved.
pub const FRAME_PREFIX_LEN: usize = 3;

/// Bytes between the application string and the payload: length, reserved.
pub const PAYLOAD_PREFIX_LEN: usize = 2;

/// Largest frame the format can describe.
pub const MAX_FRAME_LEN: usize =
    FRAME_PREFIX_LEN + MAX_FIELD_LEN + PAYLOAD_PREFIX_LEN + MAX_FIELD_LEN;

/// Errors that can occur during frame encoding or decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// A field does not fit in its single-byte length.
    #[error("{field} is {len} bytes, limit is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// The byte slice is shorter than the fixed part of the frame.
    #[error("insufficient data: need at least {needed} bytes, got {available}")]
    InsufficientData { needed: usize, available: usize },

    /// A declared length runs past the end of the received bytes.
    #[error("{segment} length mismatch: frame declares {declared} bytes, {available} available")]
    LengthMismatch {
        segment: &'static str,
        declared: usize,
        available: usize,
    },
}

/// A decoded frame borrowing from the received bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Application string naming the sender's role.
    pub app: &'a [u8],
    /// Frame-specific content.
    pub payload: &'a [u8],
}

impl Frame<'_> {
    /// Total encoded length of this frame.
    pub fn encoded_len(&self) -> usize {
        FRAME_PREFIX_LEN + self.app.len() + PAYLOAD_PREFIX_LEN + self.payload.len()
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Builds the handshake frame introducing the caller to the television.
///
/// # Errors
///
/// Returns [`ProtocolError::FieldTooLong`] if any base64-encoded field, or the
/// assembled payload, exceeds [`MAX_FIELD_LEN`] bytes.
///
/// # Examples
///
/// ```rust
/// use samsung_tv_core::protocol::{decode_frame, encode_handshake, HANDSHAKE_APP_STRING};
///
/// let bytes = encode_handshake("192.168.0.21", "samsung-tv-rs", "Remote   ").unwrap();
/// let frame = decode_frame(&bytes).unwrap();
/// assert_eq!(frame.app, HANDSHAKE_APP_STRING.as_bytes());
/// assert_eq!(&frame.payload[..2], &[0x64u8, 0x00]);
/// ```
pub fn encode_handshake(
    host: &str,
    application_id: &str,
    application_name: &str,
) -> Result<Vec<u8>, ProtocolError> {
    let mut payload = Vec::with_capacity(MAX_FIELD_LEN);
    payload.extend_from_slice(&HANDSHAKE_DISCRIMINATOR);
    write_base64_field(&mut payload, "host", host)?;
    write_base64_field(&mut payload, "application id", application_id)?;
    write_base64_field(&mut payload, "application name", application_name)?;

    encode_frame(HANDSHAKE_APP_STRING, &payload)
}

/// Builds the frame carrying one key command, e.g. `"KEY_VOLUP"`.
///
/// # Errors
///
/// Returns [`ProtocolError::FieldTooLong`] if the base64-encoded command
/// exceeds [`MAX_FIELD_LEN`] bytes.
pub fn encode_command(command: &str) -> Result<Vec<u8>, ProtocolError> {
    let mut payload = Vec::with_capacity(
        COMMAND_PREFIX.len() + PAYLOAD_PREFIX_LEN + base64::encoded_len(command.len()),
    );
    payload.extend_from_slice(&COMMAND_PREFIX);
    write_base64_field(&mut payload, "command", command)?;

    encode_frame(COMMAND_APP_STRING, &payload)
}

/// Wraps `payload` in the outer frame tagged with `app`.
///
/// # Errors
///
/// Returns [`ProtocolError::FieldTooLong`] if `app` or `payload` is longer
/// than [`MAX_FIELD_LEN`] bytes.
pub fn encode_frame(app: &str, payload: &[u8]) -> Result<Vec<u8>, ProtocolError> {
    let app_len = length_byte("application string", app.len())?;
    let payload_len = length_byte("payload", payload.len())?;

    let mut buf =
        Vec::with_capacity(FRAME_PREFIX_LEN + app.len() + PAYLOAD_PREFIX_LEN + payload.len());
    buf.push(0x00);
    buf.push(app_len);
    buf.push(0x00); // high byte
    buf.extend_from_slice(app.as_bytes());
    buf.push(payload_len);
    buf.push(0x00); // high byte
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Parses the outer frame at the start of `bytes`.
///
/// Bytes after the frame are ignored.  Never reads past the lengths the frame
/// itself declares.
///
/// # Errors
///
/// Returns [`ProtocolError::InsufficientData`] if the fixed header bytes are
/// missing, or [`ProtocolError::LengthMismatch`] if a declared length runs
/// past the end of `bytes`.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame<'_>, ProtocolError> {
    if bytes.len() < FRAME_PREFIX_LEN {
        return Err(ProtocolError::InsufficientData {
            needed: FRAME_PREFIX_LEN,
            available: bytes.len(),
        });
    }

    let app_len = bytes[1] as usize;
    let app_start = FRAME_PREFIX_LEN;
    let app_end = app_start + app_len;
    if bytes.len() < app_end {
        return Err(ProtocolError::LengthMismatch {
            segment: "application string",
            declared: app_len,
            available: bytes.len() - app_start,
        });
    }
    if bytes.len() < app_end + 1 {
        return Err(ProtocolError::InsufficientData {
            needed: app_end + 1,
            available: bytes.len(),
        });
    }

    let payload_len = bytes[app_end] as usize;
    let payload_start = app_end + PAYLOAD_PREFIX_LEN;
    let payload_end = payload_start + payload_len;
    if bytes.len() < payload_end {
        return Err(ProtocolError::LengthMismatch {
            segment: "payload",
            declared: payload_len,
            available: bytes.len().saturating_sub(payload_start),
        });
    }

    Ok(Frame {
        app: &bytes[app_start..app_end],
        payload: &bytes[payload_start..payload_end],
    })
}

/// Returns the total length of the frame starting at `bytes[0]`, once enough
/// of its header has arrived to know it.
///
/// Returns `None` while the application-string length or the payload length
/// byte is still missing.
///
/// ```rust
/// use samsung_tv_core::frame_len;
///
/// assert_eq!(frame_len(&[0x00, 0x02]), None);
/// assert_eq!(frame_len(&[0x00, 0x02, 0x00, b't', b'v', 0x04]), Some(11));
/// ```
pub fn frame_len(bytes: &[u8]) -> Option<usize> {
    let app_len = *bytes.get(1)? as usize;
    let payload_len = *bytes.get(FRAME_PREFIX_LEN + app_len)? as usize;
    Some(FRAME_PREFIX_LEN + app_len + PAYLOAD_PREFIX_LEN + payload_len)
}

/// Decodes the television's reply and classifies its payload.
///
/// A well-formed frame always yields an outcome (unknown payloads become
/// [`ResponseOutcome::Unrecognized`]).  A short or inconsistent frame is an
/// error: in that case nobody knows what the television meant.
///
/// # Errors
///
/// See [`decode_frame`].
pub fn decode_response(bytes: &[u8]) -> Result<ResponseOutcome, ProtocolError> {
    let frame = decode_frame(bytes)?;
    let outcome = classify_payload(frame.payload);
    trace!(
        app = %String::from_utf8_lossy(frame.app),
        payload = ?frame.payload,
        ?outcome,
        "decoded response frame"
    );
    Ok(outcome)
}

// ── Utility helpers ───────────────────────────────────────────────────────────

fn length_byte(field: &'static str, len: usize) -> Result<u8, ProtocolError> {
    u8::try_from(len).map_err(|_| ProtocolError::FieldTooLong {
        field,
        len,
        max: MAX_FIELD_LEN,
    })
}

/// Appends `[len][0x00][base64(value)]`.
fn write_base64_field(
    buf: &mut Vec<u8>,
    field: &'static str,
    value: &str,
) -> Result<(), ProtocolError> {
    let encoded = base64::encode(value.as_bytes());
    let len = length_byte(field, encoded.len())?;
    buf.push(len);
    buf.push(0x00);
    buf.extend_from_slice(encoded.as_bytes());
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn response(payload: &[u8]) -> Vec<u8> {
        encode_frame("iapp.samsung", payload).expect("encode failed")
    }

    // ── Handshake ────────────────────────────────────────────────────────────

    #[test]
    fn test_handshake_matches_reference_bytes() {
        let bytes = encode_handshake("10.0.0.1", "id", "tv").unwrap();

        let mut expected = vec![0x00, 20, 0x00];
        expected.extend_from_slice(b"iphone..iapp.samsung");
        // payload: 2 + (2+12) + (2+4) + (2+4) = 28
        expected.extend_from_slice(&[28, 0x00]);
        expected.extend_from_slice(&[0x64, 0x00]);
        expected.extend_from_slice(&[12, 0x00]);
        expected.extend_from_slice(b"MTAuMC4wLjE=");
        expected.extend_from_slice(&[4, 0x00]);
        expected.extend_from_slice(b"aWQ=");
        expected.extend_from_slice(&[4, 0x00]);
        expected.extend_from_slice(b"dHY=");

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_handshake_fields_are_in_host_id_name_order() {
        let bytes = encode_handshake("h", "i", "n").unwrap();
        let frame = decode_frame(&bytes).unwrap();
        // "aA==", "aQ==", "bg=="
        assert_eq!(&frame.payload[4..8], b"aA==");
        assert_eq!(&frame.payload[10..14], b"aQ==");
        assert_eq!(&frame.payload[16..20], b"bg==");
    }

    #[test]
    fn test_handshake_rejects_oversized_field() {
        // 190 bytes encode to 256 base64 characters.
        let long_name = "n".repeat(190);
        let result = encode_handshake("tv", "id", &long_name);
        assert_eq!(
            result,
            Err(ProtocolError::FieldTooLong {
                field: "application name",
                len: 256,
                max: MAX_FIELD_LEN
            })
        );
    }

    #[test]
    fn test_handshake_rejects_payload_over_255_even_if_each_field_fits() {
        // Three 100-byte fields each encode to 136 bytes; together they overflow.
        let field = "x".repeat(100);
        let result = encode_handshake(&field, &field, &field);
        assert!(matches!(
            result,
            Err(ProtocolError::FieldTooLong { field: "payload", .. })
        ));
    }

    // ── Command ──────────────────────────────────────────────────────────────

    #[test]
    fn test_command_matches_reference_bytes() {
        let bytes = encode_command("KEY_VOLUP").unwrap();

        let mut expected = vec![0x00, 29, 0x00];
        expected.extend_from_slice(b"iphone.UN60D6000.iapp.samsung");
        expected.extend_from_slice(&[17, 0x00]);
        expected.extend_from_slice(&[0x00, 0x00, 0x00]);
        expected.extend_from_slice(&[12, 0x00]);
        expected.extend_from_slice(b"S0VZX1ZPTFVQ");

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_command_accepts_largest_encodable_name() {
        // 189 bytes -> 252 base64 bytes; payload 3 + 2 + 252 = 257 is too big,
        // so the largest command whose *payload* fits is 186 bytes (248 + 5).
        let command = "K".repeat(186);
        let bytes = encode_command(&command).unwrap();
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(frame.payload.len(), 253);
    }

    #[test]
    fn test_command_rejects_oversized_name() {
        let command = "K".repeat(200);
        assert!(matches!(
            encode_command(&command),
            Err(ProtocolError::FieldTooLong { field: "command", len: 268, .. })
        ));
    }

    #[test]
    fn test_empty_command_is_encodable() {
        let bytes = encode_command("").unwrap();
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(frame.payload, &[0x00u8, 0x00, 0x00, 0x00, 0x00]);
    }

    // ── Outer frame ──────────────────────────────────────────────────────────

    #[test]
    fn test_encode_frame_rejects_long_app_string() {
        let app = "a".repeat(256);
        assert!(matches!(
            encode_frame(&app, &[]),
            Err(ProtocolError::FieldTooLong { field: "application string", .. })
        ));
    }

    #[test]
    fn test_decode_frame_ignores_trailing_bytes() {
        let mut bytes = response(&[0x65, 0x00]);
        bytes.extend_from_slice(&[0xFF, 0xFF]);
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(frame.payload, &[0x65u8, 0x00]);
        assert_eq!(frame.encoded_len(), bytes.len() - 2);
    }

    #[test]
    fn test_decode_frame_ignores_reserved_high_bytes() {
        let bytes = [0x00, 0x01, 0x7F, b'x', 0x02, 0x7F, 0x65, 0x00];
        let frame = decode_frame(&bytes).unwrap();
        assert_eq!(frame.app, b"x");
        assert_eq!(frame.payload, &[0x65u8, 0x00]);
    }

    #[test]
    fn test_decode_frame_empty_bytes_returns_insufficient_data() {
        assert_eq!(
            decode_frame(&[]),
            Err(ProtocolError::InsufficientData { needed: 3, available: 0 })
        );
    }

    #[test]
    fn test_decode_frame_truncated_app_string_returns_mismatch() {
        let bytes = [0x00, 0x0C, 0x00, b'i', b'a'];
        assert!(matches!(
            decode_frame(&bytes),
            Err(ProtocolError::LengthMismatch { segment: "application string", declared: 12, .. })
        ));
    }

    #[test]
    fn test_decode_frame_truncated_payload_returns_mismatch() {
        let mut bytes = response(&[0x64, 0x00, 0x01, 0x00]);
        bytes.truncate(bytes.len() - 1);
        assert_eq!(
            decode_frame(&bytes),
            Err(ProtocolError::LengthMismatch {
                segment: "payload",
                declared: 4,
                available: 3
            })
        );
    }

    // ── frame_len ────────────────────────────────────────────────────────────

    #[test]
    fn test_frame_len_is_none_until_payload_length_arrives() {
        let bytes = response(&[0x64, 0x00, 0x01, 0x00]);
        let payload_len_offset = FRAME_PREFIX_LEN + "iapp.samsung".len();
        for cut in 0..=payload_len_offset {
            assert_eq!(frame_len(&bytes[..cut]), None, "cut at {cut}");
        }
        assert_eq!(frame_len(&bytes[..payload_len_offset + 1]), Some(bytes.len()));
    }

    #[test]
    fn test_frame_len_never_exceeds_max_frame_len() {
        let mut bytes = vec![0x00, 0xFF, 0x00];
        bytes.extend(std::iter::repeat(b'a').take(255));
        bytes.push(0xFF);
        assert_eq!(frame_len(&bytes), Some(MAX_FRAME_LEN));
    }

    // ── decode_response ──────────────────────────────────────────────────────

    #[test]
    fn test_decode_response_classifies_known_payloads() {
        let cases: [(&[u8], ResponseOutcome); 5] = [
            (&[0x64, 0x00, 0x01, 0x00], ResponseOutcome::Accepted),
            (&[0x64, 0x00, 0x00, 0x00], ResponseOutcome::Denied),
            (&[0x0A, 0x00, 0x01, 0x00, 0x00, 0x00], ResponseOutcome::PendingUserDecision),
            (&[0x0A, 0x00, 0x02, 0x00, 0x00, 0x00], ResponseOutcome::PendingUserDecision),
            (&[0x65, 0x00], ResponseOutcome::UserTimeoutOrCancelled),
        ];
        for (payload, expected) in cases {
            assert_eq!(decode_response(&response(payload)), Ok(expected), "{payload:02X?}");
        }
    }

    #[test]
    fn test_decode_response_unknown_payload_is_unrecognized() {
        assert_eq!(
            decode_response(&response(&[0x64, 0x00, 0x02, 0x00])),
            Ok(ResponseOutcome::Unrecognized)
        );
    }

    #[test]
    fn test_decode_response_truncated_frame_is_an_error_not_unrecognized() {
        let bytes = [0x00, 0x0C, 0x00];
        assert!(decode_response(&bytes).is_err());
    }
}
