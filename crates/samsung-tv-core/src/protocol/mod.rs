//! Protocol module containing the frame codec, field encoding, and response outcomes.

pub mod base64;
pub mod codec;
pub mod outcome;

pub use codec::{
    decode_frame, decode_response, encode_command, encode_frame, encode_handshake, frame_len,
    Frame, ProtocolError, COMMAND_APP_STRING, HANDSHAKE_APP_STRING, MAX_FIELD_LEN, MAX_FRAME_LEN,
};
pub use outcome::{classify_payload, ResponseOutcome};
