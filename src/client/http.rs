//! HTTP client implementation for the invoicing API.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;
use std::sync::Arc;

use crate::api::{InvoicesService, TokenService};
use crate::models::AccessToken;
use crate::{Error, Result};

use super::config::ClientConfig;
use super::request::{create_data, ApiRequest, HttpMethod};
use super::response::{effective_object, is_json_content_type, project, ApiResponse};
use super::route::Route;

/// The main client for interacting with the invoicing API.
///
/// Every service reachable from the client is wired to its route once, at
/// construction. Tokens are not stored; each call takes one.
///
/// # Example
///
/// ```no_run
/// use hg_api_client::{HgClient, InvoiceId};
/// use hg_api_client::models::{ClientCredentials, QrCodeOptions};
///
/// # async fn example() -> hg_api_client::Result<()> {
/// let client = HgClient::new("https://api.example.by")?;
///
/// let credentials = ClientCredentials::new(1001, "secret", 42, 7);
/// let token = client.token().get(&credentials).await?.expect("token");
///
/// let id = InvoiceId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// let qr = client
///     .invoices()
///     .get_qrcode(&token, &id, QrCodeOptions::default())
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HgClient {
    inner: Arc<ClientInner>,
    root: Route,
    invoices: InvoicesService,
    token: TokenService,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) config: ClientConfig,
}

impl HgClient {
    /// Create a client for `base_url` with the default configuration.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a client for `base_url` with a custom configuration.
    pub fn with_config(base_url: impl Into<String>, config: ClientConfig) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)?;
        url::Url::parse(&config.token_url)?;

        // one connection per call; nothing is pooled between calls
        let mut builder = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .pool_max_idle_per_host(0);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let inner = Arc::new(ClientInner { http, config });
        let root = Route::root(base_url);

        Ok(Self {
            invoices: InvoicesService::new(inner.clone(), &root),
            token: TokenService::new(inner.clone(), &root),
            inner,
            root,
        })
    }

    /// Get the invoice service.
    pub fn invoices(&self) -> &InvoicesService {
        &self.invoices
    }

    /// Get the token service.
    pub fn token(&self) -> &TokenService {
        &self.token
    }

    /// The base URL the client was constructed with.
    pub fn base_url(&self) -> &str {
        self.root.url()
    }

    /// The top-level route; derive routes for other resources from it.
    pub fn route(&self) -> &Route {
        &self.root
    }

    /// Dispatch an arbitrary request against `route`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hg_api_client::client::{ApiRequest, FilePart, Parameters};
    ///
    /// # async fn example(
    /// #     client: hg_api_client::HgClient,
    /// #     token: hg_api_client::AccessToken,
    /// # ) -> hg_api_client::Result<()> {
    /// let files = client.route().child("/v1/files");
    /// let request = ApiRequest::post("/").with_parameters(
    ///     Parameters::new()
    ///         .with("folder", "logos")
    ///         .with_file("file", FilePart::new(vec![0u8; 16]).with_file_name("logo.png")),
    /// );
    /// let response = client.request(&files, &token, request).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request(
        &self,
        route: &Route,
        token: &AccessToken,
        request: ApiRequest,
    ) -> Result<ApiResponse> {
        self.inner.request(route, token, request).await
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// Dispatch `request` against `route` and normalize the response.
    pub(crate) async fn request(
        &self,
        route: &Route,
        token: &AccessToken,
        request: ApiRequest,
    ) -> Result<ApiResponse> {
        let ApiRequest {
            method,
            path,
            parameters,
            content_type,
            response_key,
        } = request;

        let buckets = create_data(parameters, method);
        let url = route.create_url(&path, &buckets.query)?;
        let headers = build_headers(token, content_type.as_deref())?;

        tracing::debug!(
            method = ?method,
            url = %url,
            json_params = buckets.json.len(),
            query_params = buckets.query.len(),
            files = buckets.files.len(),
            "dispatching request"
        );

        let builder = match method {
            HttpMethod::Get => self.http.get(&url),
            HttpMethod::Post if !buckets.files.is_empty() => {
                self.http.post(&url).multipart(buckets.into_form()?)
            }
            HttpMethod::Post => self.http.post(&url).json(&buckets.json),
        };
        let response = builder.headers(headers).send().await?;

        if !is_json_content_type(response.headers()) {
            tracing::warn!(
                status = response.status().as_u16(),
                url = %url,
                "non-JSON response; returning it unread"
            );
            return Ok(ApiResponse::Raw(response));
        }

        let body: Value = serde_json::from_slice(&response.bytes().await?)?;
        let effective = effective_object(body)?;
        tracing::trace!(response_key = ?response_key, "decoded response");

        Ok(ApiResponse::Value(project(effective, response_key.as_deref())))
    }
}

/// Build request headers with authentication.
fn build_headers(token: &AccessToken, content_type: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(content_type) = content_type {
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_str(content_type)
                .map_err(|_| Error::InvalidInput("Invalid content type".to_string()))?,
        );
    }

    let mut authorization = HeaderValue::from_str(&token.bearer())
        .map_err(|_| Error::InvalidInput("Invalid token format".to_string()))?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    Ok(headers)
}

impl std::fmt::Debug for HgClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HgClient")
            .field("base_url", &self.root.url())
            .field("config", &self.inner.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_without_content_type() {
        let headers = build_headers(&AccessToken::new("abc"), None).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert!(headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_headers_with_content_type() {
        let headers = build_headers(&AccessToken::new("abc"), Some("application/json")).unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_invalid_token_rejected() {
        let err = build_headers(&AccessToken::new("bad\ntoken"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_services_are_wired_at_construction() {
        let client = HgClient::new("https://x").unwrap();
        assert_eq!(client.base_url(), "https://x");
        assert_eq!(client.invoices().url(), "https://x/v1/invoicing/invoice");
        assert_eq!(client.token().url(), "https://x");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(matches!(HgClient::new("not a url"), Err(Error::UrlParse(_))));
    }
}
