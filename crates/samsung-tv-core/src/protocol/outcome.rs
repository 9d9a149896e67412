//! Classification of the television's reply to a command exchange.
//!
//! The reply payload is matched byte-for-byte against a handful of known
//! codes.  Anything else is [`ResponseOutcome::Unrecognized`], which callers
//! treat as success: firmware versions differ in what they send after an
//! accepted command, and refusing those replies would break working TVs.

/// Payload sent when the command was carried out.
pub const ACCEPTED: [u8; 4] = [0x64, 0x00, 0x01, 0x00];

/// Payload sent when the user refused access for this application ID.
pub const DENIED: [u8; 4] = [0x64, 0x00, 0x00, 0x00];

/// Payloads sent while the pairing prompt is still on screen.
pub const PENDING: [[u8; 6]; 2] = [
    [0x0A, 0x00, 0x01, 0x00, 0x00, 0x00],
    [0x0A, 0x00, 0x02, 0x00, 0x00, 0x00],
];

/// Payload sent when the prompt expired or was dismissed.
pub const TIMEOUT_OR_CANCELLED: [u8; 2] = [0x65, 0x00];

/// Meaning of a response payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseOutcome {
    /// The command was accepted.
    Accepted,
    /// The user denied this application.
    Denied,
    /// The user has not answered the pairing prompt yet.
    PendingUserDecision,
    /// The pairing prompt timed out or was cancelled on the TV.
    UserTimeoutOrCancelled,
    /// A well-formed payload that matches no known code.
    Unrecognized,
}

impl ResponseOutcome {
    /// Returns `true` for outcomes the command client reports as success.
    ///
    /// `Unrecognized` counts as success on purpose; see the module docs.
    pub fn is_success(self) -> bool {
        matches!(self, Self::Accepted | Self::Unrecognized)
    }
}

/// Maps a response payload to its [`ResponseOutcome`] by exact byte match.
///
/// # Examples
///
/// ```rust
/// use samsung_tv_core::{classify_payload, ResponseOutcome};
///
/// assert_eq!(classify_payload(&[0x64, 0x00, 0x01, 0x00]), ResponseOutcome::Accepted);
/// assert_eq!(classify_payload(&[0x65, 0x00]), ResponseOutcome::UserTimeoutOrCancelled);
/// assert_eq!(classify_payload(&[0x01]), ResponseOutcome::Unrecognized);
/// ```
pub fn classify_payload(payload: &[u8]) -> ResponseOutcome {
    if payload == ACCEPTED {
        ResponseOutcome::Accepted
    } else if payload == DENIED {
        ResponseOutcome::Denied
    } else if PENDING.iter().any(|code| code.as_slice() == payload) {
        ResponseOutcome::PendingUserDecision
    } else if payload == TIMEOUT_OR_CANCELLED {
        ResponseOutcome::UserTimeoutOrCancelled
    } else {
        ResponseOutcome::Unrecognized
    }
}
