//! Response normalization: unwrapping, projection and the raw fallback.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use serde_json::Value;

use crate::{Error, Result};

/// The result of an API call.
#[derive(Debug)]
pub enum ApiResponse {
    /// Decoded JSON: the projected field, or the whole effective object
    Value(Value),
    /// The server declared a non-JSON content type; the response is handed
    /// back unread so the caller can inspect status, headers and body
    Raw(reqwest::Response),
}

impl ApiResponse {
    /// The decoded value, if the response was JSON.
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            ApiResponse::Value(value) => Some(value),
            ApiResponse::Raw(_) => None,
        }
    }

    /// Consume into the decoded value, if the response was JSON.
    pub fn into_value(self) -> Option<Value> {
        match self {
            ApiResponse::Value(value) => Some(value),
            ApiResponse::Raw(_) => None,
        }
    }

    /// The decoded value as a string slice, if it is a JSON string.
    pub fn as_str(&self) -> Option<&str> {
        self.as_value().and_then(Value::as_str)
    }

    /// Consume into the raw transport response, if the response was not JSON.
    pub fn into_raw(self) -> Option<reqwest::Response> {
        match self {
            ApiResponse::Raw(response) => Some(response),
            ApiResponse::Value(_) => None,
        }
    }

    /// Whether this is the raw non-JSON fallback.
    pub fn is_raw(&self) -> bool {
        matches!(self, ApiResponse::Raw(_))
    }
}

/// Whether `value` counts as present for projection.
///
/// `null`, `false`, zero, and empty strings, arrays and objects do not.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// The value projection works on: the first element of an array body, or
/// the body itself.
pub(crate) fn effective_object(body: Value) -> Result<Value> {
    match body {
        Value::Array(items) => items.into_iter().next().ok_or(Error::EmptyResponse),
        other => Ok(other),
    }
}

/// Pick `key` out of `effective`.
///
/// Falls back to the whole of `effective` when the key is missing or its
/// value is falsy, so `{"id": 0}` projected on `id` stays `{"id": 0}`.
pub(crate) fn project(effective: Value, key: Option<&str>) -> Value {
    let Some(key) = key else {
        return effective;
    };

    let picked = effective.get(key).filter(|value| is_truthy(value)).cloned();
    picked.unwrap_or(effective)
}

/// Whether the declared content type is JSON. A missing header is not.
pub(crate) fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}
