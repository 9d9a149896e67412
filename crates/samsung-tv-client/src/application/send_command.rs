//! CommandClient: sends one remote-control key to a television.
//!
//! Each call is a complete, independent exchange:
//!
//! ```text
//! connect ─▶ handshake frame ─▶ command frame ─▶ read reply ─▶ close
//! ```
//!
//! No state survives between calls and nothing is retried.  When the
//! television is still showing its pairing prompt the caller decides whether
//! and when to try again (see [`CommandError::is_retryable`]).

use std::time::Duration;

use samsung_tv_core::{
    decode_response, encode_command, encode_handshake, DeviceIdentity, ProtocolError,
    ResponseOutcome,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::infrastructure::network::{TransportError, TransportSession, SAMSUNG_REMOTE_PORT};

/// Error type for the send-command use case.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The TV user refused access for this application ID.
    #[error("command denied: the TV user has not allowed access")]
    Denied,

    /// The pairing prompt is on screen and has not been answered yet.
    #[error("waiting for the TV user to grant or deny access")]
    PendingUserDecision,

    /// The pairing prompt expired or was dismissed on the TV.
    #[error("pairing prompt timed out or was cancelled by the TV user")]
    UserTimeoutOrCancelled,

    /// The connection could not be opened, or failed mid-exchange.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The identity or command cannot be represented in a frame.
    #[error("cannot encode request: {0}")]
    Encode(#[source] ProtocolError),

    /// The reply was truncated or malformed; its meaning is unknown.
    #[error("cannot decode response: {0}")]
    Decode(#[source] ProtocolError),
}

impl CommandError {
    /// Returns `true` when sending the same command later may succeed
    /// without changing anything on the caller's side.
    ///
    /// A pending or expired prompt clears once the user acts on the TV.  A
    /// denial is sticky for the application ID, and encode failures repeat
    /// deterministically.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PendingUserDecision | Self::UserTimeoutOrCancelled)
    }
}

/// Connection settings for [`CommandClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConfig {
    /// Remote-control TCP port.
    pub port: u16,
    /// Upper bound on establishing the connection.
    pub connect_timeout: Duration,
    /// Upper bound on each write and on receiving the whole reply.
    pub response_timeout: Duration,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            port: SAMSUNG_REMOTE_PORT,
            connect_timeout: Duration::from_secs(5),
            response_timeout: Duration::from_secs(5),
        }
    }
}

/// Sends key commands, one connection per command.
#[derive(Debug, Clone, Default)]
pub struct CommandClient {
    config: CommandConfig,
}

impl CommandClient {
    /// Creates a client with the given connection settings.
    pub fn new(config: CommandConfig) -> Self {
        Self { config }
    }

    /// Returns the connection settings.
    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Sends `command` (e.g. `"KEY_VOLUP"`) to the television described by `device`.
    ///
    /// Both frames are built before connecting, so an unencodable request
    /// never touches the network.  The connection is closed on every path.
    ///
    /// # Errors
    ///
    /// - [`CommandError::Denied`], [`CommandError::PendingUserDecision`],
    ///   [`CommandError::UserTimeoutOrCancelled`] for the matching replies.
    /// - [`CommandError::Transport`] if connecting, writing, or reading fails.
    /// - [`CommandError::Encode`] / [`CommandError::Decode`] for frames that
    ///   cannot be built or parsed.
    ///
    /// An unrecognised but well-formed reply is **success**.
    pub async fn send_command(
        &self,
        device: &DeviceIdentity,
        command: &str,
    ) -> Result<(), CommandError> {
        info!("sending command {command} to TV {}", device.host());

        let handshake = encode_handshake(
            device.host(),
            device.application_id(),
            device.application_name(),
        )
        .map_err(CommandError::Encode)?;
        let command_frame = encode_command(command).map_err(CommandError::Encode)?;

        let mut session = TransportSession::connect(
            device.host(),
            self.config.port,
            self.config.connect_timeout,
        )
        .await?;

        let exchange = async {
            session
                .send(&[&handshake, &command_frame], self.config.response_timeout)
                .await?;
            session.receive(self.config.response_timeout).await
        }
        .await;
        session.close().await;

        let response = exchange?;
        let outcome = decode_response(&response).map_err(CommandError::Decode)?;
        outcome_to_result(outcome, &response)
    }
}

fn outcome_to_result(outcome: ResponseOutcome, response: &[u8]) -> Result<(), CommandError> {
    match outcome {
        ResponseOutcome::Accepted => {
            debug!("command accepted");
            Ok(())
        }
        ResponseOutcome::Unrecognized => {
            warn!("unrecognised response {response:02X?}; assuming the command was accepted");
            Ok(())
        }
        ResponseOutcome::Denied => Err(CommandError::Denied),
        ResponseOutcome::PendingUserDecision => Err(CommandError::PendingUserDecision),
        ResponseOutcome::UserTimeoutOrCancelled => Err(CommandError::UserTimeoutOrCancelled),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
