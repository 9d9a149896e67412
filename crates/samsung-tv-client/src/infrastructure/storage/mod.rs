//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads and writes the TOML file that tells the
//! command-line program which television to talk to, which identity to
//! present during pairing, and how patient to be on the network.  A missing
//! file is not an error: every setting has a default.

pub mod config;
