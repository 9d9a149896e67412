//! Domain entities for the remote-control client.
//!
//! Pure data with validation rules and no infrastructure dependencies.

/// The identity a caller presents to a television.
///
/// See [`device::DeviceIdentity`] for the main type.
pub mod device;
