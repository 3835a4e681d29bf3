//! Data models for the invoicing API.
//!
//! - [`primitives`] - Identifier and token newtypes
//! - [`auth`] - Client credentials for the token exchange
//! - [`invoice`] - Invoice inputs, QR code options and payload defaults

pub mod primitives;
pub mod auth;
pub mod invoice;

// Re-export commonly used types
pub use primitives::*;
pub use auth::*;
pub use invoice::*;
