//! Network infrastructure for the remote-control client.
//!
//! A [`TransportSession`] is one short-lived TCP connection to the television:
//! connect, write the outbound frames, read one reply frame, close.  Nothing
//! is shared between sessions and every blocking step is bounded by a
//! timeout.
//!
//! # Reading the reply
//!
//! TCP is a stream protocol, so a single `read()` may return part of a frame.
//! [`TransportSession::receive`] keeps reading (in 64-byte chunks) until the
//! length fields at the start of the reply say the frame is complete.  If the
//! television stops sending first, the bytes received so far are returned and
//! the decoder reports the truncation.

pub mod probe;

use std::time::Duration;

use samsung_tv_core::frame_len;
use thiserror::Error;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
    time,
};
use tracing::{debug, warn};

/// TCP port of the television's remote-control service.
pub const SAMSUNG_REMOTE_PORT: u16 = 55000;

/// Size of each read from the socket.
pub const RESPONSE_CHUNK_SIZE: usize = 64;

/// Errors that can occur in the client network layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// TCP connection to the television failed.
    #[error("failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    /// A connect, write, or read did not finish in time.
    #[error("{operation} on {addr} timed out after {after:?}")]
    Timeout {
        addr: String,
        operation: &'static str,
        after: Duration,
    },
    /// An I/O error occurred on the established connection.
    #[error("connection I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The television closed the connection without sending anything.
    #[error("connection closed by {addr} before a response arrived")]
    Closed { addr: String },
}

/// One TCP connection to a television, owned by a single command exchange.
#[derive(Debug)]
pub struct TransportSession {
    addr: String,
    stream: TcpStream,
}

impl TransportSession {
    /// Opens a connection to `host:port`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ConnectFailed`] if the connection is refused
    /// or the host cannot be resolved, and [`TransportError::Timeout`] if the
    /// attempt takes longer than `timeout`.
    pub async fn connect(host: &str, port: u16, timeout: Duration) -> Result<Self, TransportError> {
        let addr = format!("{host}:{port}");
        debug!("connecting to {addr}");

        let stream = match time::timeout(timeout, TcpStream::connect((host, port))).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(source)) => return Err(TransportError::ConnectFailed { addr, source }),
            Err(_) => {
                return Err(TransportError::Timeout {
                    addr,
                    operation: "connect",
                    after: timeout,
                })
            }
        };
        // Frames are tiny; send each one as soon as it is written.
        stream.set_nodelay(true)?;

        Ok(Self { addr, stream })
    }

    /// Address this session is connected to, as `host:port`.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Writes every frame in order without waiting for a reply in between.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Io`] on a write failure and
    /// [`TransportError::Timeout`] if a write stalls for longer than `timeout`.
    pub async fn send(&mut self, frames: &[&[u8]], timeout: Duration) -> Result<(), TransportError> {
        for frame in frames {
            debug!("sending {} byte frame to {}", frame.len(), self.addr);
            match time::timeout(timeout, self.stream.write_all(frame)).await {
                Ok(result) => result?,
                Err(_) => return Err(self.timed_out("write", timeout)),
            }
        }
        match time::timeout(timeout, self.stream.flush()).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(self.timed_out("flush", timeout)),
        }
    }

    /// Reads one reply frame.
    ///
    /// Returns exactly the bytes of the first frame once its declared length
    /// has arrived.  `timeout` bounds the whole reply, not each read: if the
    /// peer closes the connection or the deadline passes after part of a
    /// frame arrived, the partial bytes are returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Closed`] or [`TransportError::Timeout`] if
    /// nothing at all arrives, and [`TransportError::Io`] on a read failure.
    pub async fn receive(&mut self, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let mut received = Vec::with_capacity(RESPONSE_CHUNK_SIZE);
        let mut chunk = [0u8; RESPONSE_CHUNK_SIZE];
        let deadline = time::Instant::now() + timeout;

        loop {
            if let Some(total) = frame_len(&received) {
                if received.len() >= total {
                    if received.len() > total {
                        debug!("ignoring {} bytes after the reply frame", received.len() - total);
                    }
                    received.truncate(total);
                    return Ok(received);
                }
            }

            let read = match time::timeout_at(deadline, self.stream.read(&mut chunk)).await {
                Ok(result) => result?,
                Err(_) if received.is_empty() => return Err(self.timed_out("read", timeout)),
                Err(_) => {
                    warn!("{} stalled after {} bytes of its reply", self.addr, received.len());
                    return Ok(received);
                }
            };

            if read == 0 {
                if received.is_empty() {
                    return Err(TransportError::Closed {
                        addr: self.addr.clone(),
                    });
                }
                warn!("{} closed the connection mid-reply", self.addr);
                return Ok(received);
            }
            received.extend_from_slice(&chunk[..read]);
        }
    }

    /// Shuts the connection down.
    ///
    /// Dropping a session also closes the socket; this only adds a graceful
    /// FIN and a log line.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!("shutdown of {} failed: {e}", self.addr);
        }
        debug!("closed connection to {}", self.addr);
    }

    fn timed_out(&self, operation: &'static str, after: Duration) -> TransportError {
        TransportError::Timeout {
            addr: self.addr.clone(),
            operation,
            after,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
