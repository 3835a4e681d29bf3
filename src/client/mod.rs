//! HTTP client and request engine for the invoicing API.
//!
//! [`HgClient`] is the entry point. Underneath it, every call goes through
//! the same steps: parameters are partitioned into JSON, query and file
//! buckets ([`create_data`]), the URL is built from the route
//! ([`Route::create_url`]), a bearer token is attached, and the JSON
//! response is unwrapped and optionally narrowed to one key
//! ([`ApiResponse`]).
//!
//! # Example
//!
//! ```no_run
//! use hg_api_client::{ClientConfig, HgClient};
//! use std::time::Duration;
//!
//! # fn example() -> hg_api_client::Result<()> {
//! let client = HgClient::with_config(
//!     "https://api.example.by",
//!     ClientConfig::default().with_timeout(Duration::from_secs(10)),
//! )?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;
mod request;
mod response;
mod route;

pub use config::{ClientConfig, DEFAULT_TOKEN_SCOPE, DEFAULT_TOKEN_URL};
pub use http::HgClient;
pub use request::{create_data, ApiRequest, Buckets, FilePart, HttpMethod, ParamValue, Parameters};
pub use response::{is_truthy, ApiResponse};
pub use route::{build_url, Route};
pub(crate) use http::ClientInner;
pub(crate) use route::expand_pairs;
