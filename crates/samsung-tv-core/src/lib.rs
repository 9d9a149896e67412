//! # samsung-tv-core
//!
//! Shared library for the Samsung TV remote-control client containing the
//! wire codec, the device identity entity, and the classification of the
//! television's replies.
//!
//! It has zero dependencies on OS APIs, async runtimes, or network sockets;
//! every function here is a pure transformation between structured values and
//! bytes.
//!
//! # Protocol overview
//!
//! Samsung televisions from the "D" generation onward listen on TCP port
//! 55000 for remote-control commands.  A command exchange is two frames sent
//! back-to-back followed by a single reply:
//!
//! ```text
//! client                                  television
//! ──────                                  ──────────
//! handshake frame (host, app id, name) ─▶
//! command frame   ("KEY_VOLUP")        ─▶
//!                                      ◀─ response frame (outcome code)
//! ```
//!
//! - **`protocol`** – Frame layout, base64 field encoding, and the mapping of
//!   response payloads to a [`ResponseOutcome`].
//!
//! - **`domain`** – The [`DeviceIdentity`] a caller presents to the
//!   television.

pub mod domain;
pub mod protocol;

pub use domain::device::{DeviceIdentity, IdentityError};
pub use protocol::codec::{
    decode_frame, decode_response, encode_command, encode_frame, encode_handshake, frame_len,
    Frame, ProtocolError,
};
pub use protocol::outcome::{classify_payload, ResponseOutcome};
