//! Token service: OAuth2 client-credentials exchange.

use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::sync::Arc;

use crate::client::{build_url, create_data, expand_pairs, ClientInner, HttpMethod, Parameters, Route};
use crate::models::{AccessToken, ClientCredentials};
use crate::Result;

/// Service for obtaining bearer tokens.
///
/// The exchange talks to the authorization server configured in
/// [`ClientConfig::token_url`](crate::ClientConfig::token_url), not to the
/// client's base URL.
///
/// # Example
///
/// ```no_run
/// use hg_api_client::HgClient;
/// use hg_api_client::models::ClientCredentials;
///
/// # async fn example(client: HgClient) -> hg_api_client::Result<()> {
/// let credentials = ClientCredentials::new(1001, "secret", 42, 7);
/// match client.token().get(&credentials).await? {
///     Some(token) => println!("authenticated"),
///     None => println!("no access_token in response"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct TokenService {
    inner: Arc<ClientInner>,
    route: Route,
}

impl TokenService {
    pub(crate) fn new(inner: Arc<ClientInner>, parent: &Route) -> Self {
        Self {
            inner,
            route: parent.child(""),
        }
    }

    /// The effective URL of this route (inherited from the client).
    pub fn url(&self) -> &str {
        self.route.url()
    }

    /// Exchange client credentials for a bearer token.
    ///
    /// Returns `None` when the response carries no (or an empty)
    /// `access_token`.
    pub async fn get(&self, credentials: &ClientCredentials) -> Result<Option<AccessToken>> {
        let config = &self.inner.config;
        let parameters = Parameters::new()
            .with("grant_type", "client_credentials")
            .with("client_id", credentials.client_id)
            .with("scope", config.token_scope.as_str())
            .with("client_secret", credentials.secret())
            .with("serviceproviderid", credentials.service_provider_id)
            .with("serviceid", credentials.service_id)
            .with("retailoutletcode", config.token_retail_outlet_code);

        let buckets = create_data(parameters, HttpMethod::Post);
        let url = build_url(&config.token_url, &buckets.query)?;
        let form: Vec<(&str, String)> = expand_pairs(&buckets.json)
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect();

        tracing::debug!(url = %url, client_id = credentials.client_id, "exchanging client credentials");

        let response = self
            .inner
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .form(&form)
            .send()
            .await?;

        let body: Value = serde_json::from_slice(&response.bytes().await?)?;
        let token = body
            .get("access_token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(AccessToken::new);

        if token.is_none() {
            tracing::warn!("token response has no access_token");
        }

        Ok(token)
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("token_url", &self.inner.config.token_url)
            .finish()
    }
}
