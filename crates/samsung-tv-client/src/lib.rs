//! samsung-tv-client library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does samsung-tv-client do?
//!
//! 1. **Send a key command** – [`application::send_command::CommandClient`]
//!    opens one TCP connection to the television's remote-control port, sends
//!    the handshake and command frames, reads the single reply, and reports
//!    whether the user has allowed, denied, or not yet answered the pairing
//!    prompt.
//! 2. **Watch the power state** – [`application::monitor_power::PowerMonitor`]
//!    repeatedly tries to connect to the same port and reports online/offline
//!    transitions.
//!
//! The library installs no logging subscriber; it emits `tracing` events and
//! leaves their filtering to the host program.

/// Application layer: the command and power-monitoring use cases.
pub mod application;

/// Infrastructure layer: TCP transport, reachability probe, and configuration.
pub mod infrastructure;

pub use application::monitor_power::{PowerMonitor, PowerWatch, ReachabilityProbe};
pub use application::send_command::{CommandClient, CommandConfig, CommandError};
pub use infrastructure::network::{probe::TcpProbe, TransportError, SAMSUNG_REMOTE_PORT};
pub use infrastructure::storage::config::{AppConfig, ConfigError};
pub use samsung_tv_core::DeviceIdentity;
