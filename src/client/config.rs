//! Client configuration options.

use std::time::Duration;

use crate::models::InvoiceDefaults;

/// Authorization server used for the client-credentials exchange.
pub const DEFAULT_TOKEN_URL: &str = "https://iii.by/connect/token";

/// OAuth2 scope requested by the token exchange.
pub const DEFAULT_TOKEN_SCOPE: &str = "epos.public.invoice";

/// Configuration for the invoicing client.
///
/// # Example
///
/// ```
/// use hg_api_client::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout; `None` leaves the transport default in place
    pub timeout: Option<Duration>,
    /// User-Agent header value
    pub user_agent: String,
    /// Absolute URL of the token endpoint
    pub token_url: String,
    /// Scope sent with the token exchange
    pub token_scope: String,
    /// Retail outlet code sent with the token exchange
    pub token_retail_outlet_code: i64,
    /// Fixed sub-fields of the invoice create payload
    pub invoice_defaults: InvoiceDefaults,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("hg-api-client/{} (Rust)", env!("CARGO_PKG_VERSION")),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            token_scope: DEFAULT_TOKEN_SCOPE.to_string(),
            token_retail_outlet_code: 1,
            invoice_defaults: InvoiceDefaults::default(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Point the token exchange at a different authorization server.
    pub fn with_token_url(mut self, token_url: impl Into<String>) -> Self {
        self.token_url = token_url.into();
        self
    }

    /// Set the scope requested by the token exchange.
    pub fn with_token_scope(mut self, scope: impl Into<String>) -> Self {
        self.token_scope = scope.into();
        self
    }

    /// Set the retail outlet code sent with the token exchange.
    pub fn with_token_retail_outlet_code(mut self, code: i64) -> Self {
        self.token_retail_outlet_code = code;
        self
    }

    /// Replace the invoice payload defaults.
    pub fn with_invoice_defaults(mut self, defaults: InvoiceDefaults) -> Self {
        self.invoice_defaults = defaults;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.timeout.is_none());
        assert_eq!(config.token_url, "https://iii.by/connect/token");
        assert_eq!(config.token_scope, "epos.public.invoice");
        assert_eq!(config.token_retail_outlet_code, 1);
        assert!(config.user_agent.starts_with("hg-api-client/"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_token_url("http://127.0.0.1:9999/connect/token")
            .with_invoice_defaults(InvoiceDefaults {
                currency: "840".to_string(),
                ..Default::default()
            });

        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.token_url, "http://127.0.0.1:9999/connect/token");
        assert_eq!(config.invoice_defaults.currency, "840");
    }
}
