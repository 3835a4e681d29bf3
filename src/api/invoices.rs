//! Invoice service.

use chrono::Utc;
use std::sync::Arc;

use crate::client::{ApiRequest, ApiResponse, ClientInner, Parameters, Route};
use crate::models::{AccessToken, InvoiceId, NewInvoice, QrCodeOptions};
use crate::{Error, Result};

/// Path prefix of the invoice resource.
pub const INVOICE_PREFIX: &str = "/v1/invoicing/invoice";

/// Service for invoice operations.
///
/// # Example
///
/// ```no_run
/// # async fn example(
/// #     client: hg_api_client::HgClient,
/// #     token: hg_api_client::AccessToken,
/// # ) -> hg_api_client::Result<()> {
/// let found = client.invoices().get(&token, "pizza").await?;
/// if let Some(records) = found.as_value() {
///     println!("{records}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct InvoicesService {
    inner: Arc<ClientInner>,
    route: Route,
}

impl InvoicesService {
    pub(crate) fn new(inner: Arc<ClientInner>, parent: &Route) -> Self {
        Self {
            inner,
            route: parent.child(INVOICE_PREFIX),
        }
    }

    /// The effective URL of the invoice resource.
    pub fn url(&self) -> &str {
        self.route.url()
    }

    /// Free-text search. Yields the matched `records`.
    pub async fn get(&self, token: &AccessToken, search_string: &str) -> Result<ApiResponse> {
        let request = ApiRequest::get("/")
            .with_parameters(Parameters::new().with("searchString", search_string))
            .with_response_key("records");

        self.inner.request(&self.route, token, request).await
    }

    /// Create an invoice due `terms_of_days` from now. Yields the new `id`.
    pub async fn create(&self, token: &AccessToken, invoice: &NewInvoice) -> Result<ApiResponse> {
        let payload = invoice.to_payload(&self.inner.config.invoice_defaults, Utc::now())?;
        let parameters = match serde_json::to_value(payload)? {
            serde_json::Value::Object(map) => Parameters::from(map),
            _ => {
                return Err(Error::InvalidInput(
                    "Invoice payload is not a JSON object".to_string(),
                ))
            }
        };

        let request = ApiRequest::post("/")
            .with_parameters(parameters)
            .with_response_key("id")
            .with_content_type("application/json");

        self.inner.request(&self.route, token, request).await
    }

    /// Send the invoice to the payer.
    pub async fn set_active(&self, token: &AccessToken, id: &InvoiceId) -> Result<ApiResponse> {
        let request = ApiRequest::post(format!("/{}/send", id));
        self.inner.request(&self.route, token, request).await
    }

    /// Cancel the invoice.
    pub async fn set_inactive(&self, token: &AccessToken, id: &InvoiceId) -> Result<ApiResponse> {
        let request = ApiRequest::post(format!("/{}/cancel", id));
        self.inner.request(&self.route, token, request).await
    }

    /// Fetch the invoice QR code. Yields the `result` field.
    pub async fn get_qrcode(
        &self,
        token: &AccessToken,
        id: &InvoiceId,
        options: QrCodeOptions,
    ) -> Result<ApiResponse> {
        let parameters = Parameters::new()
            .with("imgWidth", options.img_width)
            .with("imgHeight", options.img_height)
            .with("getImage", options.get_image);

        let request = ApiRequest::get(format!("/{}/qrcode", id))
            .with_parameters(parameters)
            .with_response_key("result");

        self.inner.request(&self.route, token, request).await
    }
}

impl std::fmt::Debug for InvoicesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvoicesService")
            .field("route", &self.route)
            .finish()
    }
}
