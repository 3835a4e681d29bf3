//! API service modules for the invoicing endpoints.
//!
//! Each service maps typed caller inputs onto the parameter shape one
//! resource family expects.

mod invoices;
mod token;

pub use invoices::{InvoicesService, INVOICE_PREFIX};
pub use token::TokenService;
