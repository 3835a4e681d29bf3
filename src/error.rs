//! Error types for the invoicing API client.
//!
//! The client does not interpret the remote service's business errors. A
//! failed call surfaces whatever went wrong underneath it: the transport
//! error from `reqwest`, or the decode error from `serde_json`.

use thiserror::Error;

/// A specialized `Result` type for invoicing API operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all invoicing API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed (connection, DNS, timeout, TLS)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The server answered with a JSON array that has no elements
    #[error("Response was an empty JSON array")]
    EmptyResponse,

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` if the error came from the network layer.
    ///
    /// # Example
    ///
    /// ```
    /// use hg_api_client::Error;
    ///
    /// let err = Error::InvalidInput("bad token".into());
    /// assert!(!err.is_transport_error());
    /// ```
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Http(_))
    }

    /// Returns `true` if a response body (or payload) could not be decoded.
    pub fn is_parse_error(&self) -> bool {
        match self {
            Error::Json(_) | Error::EmptyResponse => true,
            Error::Http(e) => e.is_decode(),
            _ => false,
        }
    }
}
