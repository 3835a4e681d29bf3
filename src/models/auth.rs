//! Client-credential models for the token exchange.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Credentials exchanged for a bearer token.
///
/// # Example
///
/// ```
/// use hg_api_client::models::ClientCredentials;
///
/// let credentials = ClientCredentials::new(1001, "s3cret", 42, 7);
/// assert_eq!(credentials.service_id, 7);
/// ```
#[derive(Clone)]
pub struct ClientCredentials {
    /// OAuth2 client ID
    pub client_id: i64,
    /// OAuth2 client secret
    pub client_secret: SecretString,
    /// Service provider ID
    pub service_provider_id: i64,
    /// Service ID
    pub service_id: i64,
}

impl ClientCredentials {
    /// Create a new set of credentials.
    pub fn new(
        client_id: i64,
        client_secret: impl Into<String>,
        service_provider_id: i64,
        service_id: i64,
    ) -> Self {
        Self {
            client_id,
            client_secret: SecretString::from(client_secret.into()),
            service_provider_id,
            service_id,
        }
    }

    pub(crate) fn secret(&self) -> &str {
        self.client_secret.expose_secret()
    }
}

impl fmt::Debug for ClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("service_provider_id", &self.service_provider_id)
            .field("service_id", &self.service_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let credentials = ClientCredentials::new(1, "super-secret", 2, 3);
        let debug_str = format!("{:?}", credentials);
        assert!(!debug_str.contains("super-secret"));
        assert!(debug_str.contains("REDACTED"));
        assert_eq!(credentials.secret(), "super-secret");
    }
}
