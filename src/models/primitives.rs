//! Primitive types and newtypes for type-safe API interactions.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed invoice identifier (the remote's UUID string).
///
/// # Example
///
/// ```
/// use hg_api_client::InvoiceId;
///
/// let id = InvoiceId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// assert_eq!(id.as_str(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
    /// Create a new invoice ID from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the invoice ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for InvoiceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for InvoiceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for InvoiceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A bearer token issued by the authorization server.
///
/// The client never stores or refreshes tokens; callers obtain one from
/// [`TokenService::get`](crate::api::TokenService::get) (or elsewhere) and
/// pass it to every invoice call.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the raw token value.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// The `Authorization` header value for this token.
    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.0.expose_secret())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl From<String> for AccessToken {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for AccessToken {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_redacts() {
        let token = AccessToken::new("super-secret-token");
        let debug_str = format!("{:?}", token);
        assert!(!debug_str.contains("super-secret-token"));
        assert!(debug_str.contains("REDACTED"));
    }

    #[test]
    fn test_bearer_header_value() {
        let token = AccessToken::from("abc");
        assert_eq!(token.bearer(), "Bearer abc");
        assert_eq!(token.expose(), "abc");
    }

    #[test]
    fn test_invoice_id_serde_transparent() {
        let id = InvoiceId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
