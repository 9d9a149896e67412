//! Device identity presented to the television during the handshake.
//!
//! # What the television does with it
//!
//! The first time a given `application_id` contacts a television, the TV
//! shows an "allow / deny" prompt naming `application_name`.  The user's
//! answer is stored against `application_id`; later commands carrying the
//! same ID are accepted (or refused) without asking again.  Changing the ID
//! makes the television ask again.
//!
//! # Padding quirk
//!
//! Some firmware renders the application name directly followed by other
//! prompt text, with no separator.  Callers usually append a run of trailing
//! spaces to the name to keep the prompt readable.  The codec sends the name
//! exactly as given and never pads it.

use thiserror::Error;

/// Errors raised when a [`DeviceIdentity`] breaks one of its rules.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The host name or address is empty.
    #[error("television host must not be empty")]
    EmptyHost,

    /// The application name is empty; the television has nothing to show.
    #[error("application name must not be empty")]
    EmptyApplicationName,
}

/// A television plus the application identity used to talk to it.
///
/// The value is never mutated by the protocol layer: operations borrow it for
/// their whole duration, so the identity cannot change mid-exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    host: String,
    application_id: String,
    application_name: String,
}

impl DeviceIdentity {
    /// Creates a validated identity.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmptyHost`] or
    /// [`IdentityError::EmptyApplicationName`] when the respective field is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use samsung_tv_core::DeviceIdentity;
    ///
    /// let tv = DeviceIdentity::new("192.168.0.21", "samsung-tv-rs", "Living Room Remote    ")
    ///     .unwrap();
    /// assert_eq!(tv.host(), "192.168.0.21");
    /// ```
    pub fn new(
        host: impl Into<String>,
        application_id: impl Into<String>,
        application_name: impl Into<String>,
    ) -> Result<Self, IdentityError> {
        let identity = Self {
            host: host.into(),
            application_id: application_id.into(),
            application_name: application_name.into(),
        };
        identity.validate()?;
        Ok(identity)
    }

    fn validate(&self) -> Result<(), IdentityError> {
        if self.host.is_empty() {
            return Err(IdentityError::EmptyHost);
        }
        if self.application_name.is_empty() {
            return Err(IdentityError::EmptyApplicationName);
        }
        Ok(())
    }

    /// Hostname or IP address of the television.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Key under which the television stores the user's allow/deny answer.
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Name shown in the television's pairing prompt.
    pub fn application_name(&self) -> &str {
        &self.application_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_complete_identity() {
        // Arrange / Act
        let tv = DeviceIdentity::new("10.0.0.5", "app-id", "Remote   ").unwrap();

        // Assert
        assert_eq!(tv.host(), "10.0.0.5");
        assert_eq!(tv.application_id(), "app-id");
        assert_eq!(tv.application_name(), "Remote   ");
    }

    #[test]
    fn test_new_rejects_empty_host() {
        let result = DeviceIdentity::new("", "app-id", "Remote");
        assert_eq!(result, Err(IdentityError::EmptyHost));
    }

    #[test]
    fn test_new_rejects_empty_application_name() {
        let result = DeviceIdentity::new("tv.local", "app-id", "");
        assert_eq!(result, Err(IdentityError::EmptyApplicationName));
    }

    #[test]
    fn test_new_allows_empty_application_id() {
        // The television accepts an empty key; it simply remembers the answer under "".
        assert!(DeviceIdentity::new("tv.local", "", "Remote").is_ok());
    }

    #[test]
    fn test_trailing_padding_in_name_is_preserved() {
        let tv = DeviceIdentity::new("tv.local", "id", "Ninja Sphere         ").unwrap();
        assert_eq!(tv.application_name().len(), 21);
    }
}
