//! Infrastructure layer for the remote-control client.
//!
//! Contains the OS-facing adapters: the tokio TCP transport used for command
//! exchanges and reachability probes, and the TOML configuration store.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `samsung_tv_core`, but MUST NOT be imported by the core crate.
//!
//! # Sub-modules
//!
//! - **`network`** – One-shot TCP sessions to the television's remote-control
//!   port, plus the connect-only probe used by the power monitor.
//!
//! - **`storage`** – Loading and saving `config.toml`.

pub mod network;
pub mod storage;
