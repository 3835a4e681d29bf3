//! # hg-api-client
//!
//! An async Rust client for the EPOS invoicing API.
//!
//! The client exchanges client credentials for a bearer token, then creates,
//! searches, sends, cancels and renders QR codes for invoices. It never
//! stores or refreshes tokens: every invoice call takes the token to use.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 client-credentials exchange
//! - **Invoices**: create, search, send, cancel, QR code
//! - **Request engine**: parameter partitioning (JSON body, query string,
//!   multipart files), bearer auth and response projection shared by every
//!   call
//! - **Async-first**: built on `reqwest` and Tokio
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hg_api_client::HgClient;
//! use hg_api_client::models::{
//!     ClientCredentials, InvoiceItem, NewInvoice, OutletAddress, Service,
//!     ServiceProvider, StoreInfo,
//! };
//! use rust_decimal_macros::dec;
//!
//! #[tokio::main]
//! async fn main() -> hg_api_client::Result<()> {
//!     let client = HgClient::new("https://api.example.by")?;
//!
//!     let credentials = ClientCredentials::new(1001, "secret", 42, 7);
//!     let Some(token) = client.token().get(&credentials).await? else {
//!         eprintln!("authorization server returned no token");
//!         return Ok(());
//!     };
//!
//!     let invoice = NewInvoice {
//!         number: "10001".to_string(),
//!         service_provider: ServiceProvider { id: 42, name: "Acme".to_string() },
//!         service: Service { id: 7, name: "Delivery".to_string() },
//!         address: OutletAddress {
//!             country: "BY".to_string(),
//!             line1: "Nezavisimosti 1".to_string(),
//!             city: "Minsk".to_string(),
//!             full_address: "BY, Minsk, Nezavisimosti 1".to_string(),
//!         },
//!         store: StoreInfo {
//!             name: "Acme Store".to_string(),
//!             locality_name: "Minsk".to_string(),
//!             locality_code: "17030".to_string(),
//!             city: "Minsk".to_string(),
//!             locality_city: "Minsk".to_string(),
//!         },
//!         items: vec![InvoiceItem::new("Pizza", dec!(1), dec!(25.50))],
//!         terms_of_days: 30,
//!     };
//!
//!     let created = client.invoices().create(&token, &invoice).await?;
//!     println!("created: {:?}", created.as_str());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod client;
pub mod error;
pub mod models;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{AccessToken, InvoiceId};
pub use client::{ApiResponse, ClientConfig, HgClient};

/// Prelude module for convenient imports.
///
/// ```rust
/// use hg_api_client::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        AccessToken, InvoiceId,
        // Auth
        ClientCredentials,
        // Invoices
        InvoiceItem, NewInvoice, OutletAddress, QrCodeOptions, Service, ServiceProvider,
        StoreInfo, InvoiceDefaults,
    };
    pub use crate::client::{ApiResponse, ClientConfig, HgClient};
    pub use crate::api::{InvoicesService, TokenService};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoice_id_creation() {
        let id = InvoiceId::new("abc");
        assert_eq!(id.as_str(), "abc");
        assert_eq!(id.to_string(), "abc");
    }

    #[test]
    fn test_client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HgClient>();
    }
}
