//! Standard base64 (RFC 4648 §4) encoding for frame fields.
//!
//! Every string the television reads out of a frame (host, application ID,
//! application name, key name) travels base64-encoded with `=` padding.  Only
//! the encoding direction is needed: the television never sends base64 back.

/// The standard base64 alphabet as defined in RFC 4648 §4.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Returns the length of the padded base64 encoding of `input_len` bytes.
///
/// ```rust
/// use samsung_tv_core::protocol::base64::encoded_len;
///
/// assert_eq!(encoded_len(0), 0);
/// assert_eq!(encoded_len(1), 4);
/// assert_eq!(encoded_len(189), 252);
/// ```
pub const fn encoded_len(input_len: usize) -> usize {
    (input_len + 2) / 3 * 4
}

/// Encodes `data` as padded standard base64.
///
/// Input bytes are processed in 3-byte chunks.  Each 24-bit chunk is split
/// into four 6-bit indices into [`ALPHABET`]; a short final chunk is padded
/// with `=`.
pub fn encode(data: &[u8]) -> String {
    let mut result = String::with_capacity(encoded_len(data.len()));

    for chunk in data.chunks(3) {
        let b0 = chunk[0];
        let b1 = chunk.get(1).copied().unwrap_or(0);
        let b2 = chunk.get(2).copied().unwrap_or(0);

        let i0 = (b0 >> 2) as usize;
        let i1 = (((b0 & 0x03) << 4) | (b1 >> 4)) as usize;
        let i2 = (((b1 & 0x0F) << 2) | (b2 >> 6)) as usize;
        let i3 = (b2 & 0x3F) as usize;

        result.push(ALPHABET[i0] as char);
        result.push(ALPHABET[i1] as char);
        result.push(if chunk.len() > 1 { ALPHABET[i2] as char } else { '=' });
        result.push(if chunk.len() > 2 { ALPHABET[i3] as char } else { '=' });
    }

    result
}
