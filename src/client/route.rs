//! Route composition and URL construction.

use serde_json::{Map, Value};
use url::Url;

use crate::Result;

/// A logical endpoint grouping bound to a URL prefix.
///
/// A route's URL is its parent's URL followed by its own prefix. The URL is
/// computed once, when the route is derived, and never re-evaluated.
///
/// # Example
///
/// ```
/// use hg_api_client::client::Route;
///
/// let root = Route::root("https://x");
/// let invoices = root.child("/v1/invoicing/invoice");
/// assert_eq!(invoices.url(), "https://x/v1/invoicing/invoice");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    prefix: String,
    url: String,
}

impl Route {
    /// The top-level route for `base_url`.
    pub fn root(base_url: impl Into<String>) -> Self {
        Self {
            prefix: String::new(),
            url: base_url.into(),
        }
    }

    /// Derive a nested route. An empty prefix inherits this URL verbatim.
    pub fn child(&self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let url = format!("{}{}", self.url, prefix);
        Self { prefix, url }
    }

    /// The effective URL of this route.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The prefix this route added to its parent's URL.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Build the URL for `path` under this route with `query` appended.
    pub fn create_url(&self, path: &str, query: &Map<String, Value>) -> Result<String> {
        build_url(&format!("{}{}", self.url, path), query)
    }
}

/// Encode `query` as the query string of `base`.
///
/// An empty `query` returns `base` unchanged. Otherwise any query already on
/// `base` is replaced. Keys are never dropped, whatever their value; an
/// array repeats its key once per element.
///
/// # Example
///
/// ```
/// use hg_api_client::client::build_url;
/// use serde_json::json;
///
/// let query = json!({"imgWidth": 100, "getImage": false});
/// let url = build_url("https://x/abc/qrcode", query.as_object().unwrap()).unwrap();
/// assert_eq!(url, "https://x/abc/qrcode?imgWidth=100&getImage=False");
/// ```
pub fn build_url(base: &str, query: &Map<String, Value>) -> Result<String> {
    if query.is_empty() {
        return Ok(base.to_string());
    }

    let mut url = Url::parse(base)?;
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, rendered) in expand_pairs(query) {
            match rendered {
                Some(rendered) => pairs.append_pair(key, &rendered),
                None => pairs.append_key_only(key),
            };
        }
    }

    Ok(url.to_string())
}

/// Flatten parameters into `(key, text)` pairs for a query string or form
/// body. Array elements each get their own pair under the array's key.
pub(crate) fn expand_pairs(params: &Map<String, Value>) -> Vec<(&str, Option<String>)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().map(|item| (key.as_str(), render_value(item))));
            }
            other => pairs.push((key.as_str(), render_value(other))),
        }
    }
    pairs
}

/// Text form of a single parameter value.
///
/// Booleans use the `True`/`False` spelling the remote expects; `null` has
/// no text form and is sent as a bare key. Nested structures are sent as
/// compact JSON.
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}
