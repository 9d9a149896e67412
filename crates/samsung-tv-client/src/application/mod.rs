//! Application layer use cases for the remote-control client.
//!
//! - **`send_command`** – One key command per connection: handshake frame,
//!   command frame, one reply, mapped to success or a [`send_command::CommandError`].
//!
//! - **`monitor_power`** – Online/offline detection built on a
//!   [`monitor_power::ReachabilityProbe`] that is injected at construction
//!   time, so the state machine can be tested without sockets.

pub mod monitor_power;
pub mod send_command;
