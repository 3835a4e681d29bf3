//! Request descriptors and parameter partitioning.

use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};

use crate::{Error, Result};

/// HTTP method of an API call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET; parameters travel in the query string
    #[default]
    Get,
    /// POST; parameters travel as a JSON body unless files are attached
    Post,
}

/// A binary upload attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Raw file content
    pub bytes: Vec<u8>,
    /// File name reported in the multipart part
    pub file_name: Option<String>,
    /// MIME type of the part
    pub mime_type: Option<String>,
}

impl FilePart {
    /// Create a part from raw bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: None,
            mime_type: None,
        }
    }

    /// Set the file name.
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    /// Set the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    fn into_part(self) -> Result<Part> {
        let mut part = Part::bytes(self.bytes);
        if let Some(file_name) = self.file_name {
            part = part.file_name(file_name);
        }
        if let Some(mime_type) = self.mime_type {
            part = part.mime_str(&mime_type)?;
        }
        Ok(part)
    }
}

/// A single parameter value: plain JSON data or a binary upload.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// JSON-representable value
    Value(Value),
    /// Binary upload
    File(FilePart),
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Value(value)
    }
}

impl From<FilePart> for ParamValue {
    fn from(file: FilePart) -> Self {
        ParamValue::File(file)
    }
}

/// Ordered mapping of parameter name to value.
///
/// Inserting an existing name replaces its value in place.
///
/// # Example
///
/// ```
/// use hg_api_client::client::{FilePart, Parameters};
///
/// let params = Parameters::new()
///     .with("searchString", "pizza")
///     .with_file("logo", FilePart::new(vec![0x89, 0x50]));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(Vec<(String, ParamValue)>);

impl Parameters {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a JSON value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.insert_param(name.into(), ParamValue::Value(value.into()));
    }

    /// Insert a binary upload.
    pub fn insert_file(&mut self, name: impl Into<String>, file: FilePart) {
        self.insert_param(name.into(), ParamValue::File(file));
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Builder form of [`insert_file`](Self::insert_file).
    pub fn with_file(mut self, name: impl Into<String>, file: FilePart) -> Self {
        self.insert_file(name, file);
        self
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn insert_param(&mut self, name: String, value: ParamValue) {
        match self.0.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((name, value)),
        }
    }
}

impl From<Map<String, Value>> for Parameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(
            map.into_iter()
                .map(|(name, value)| (name, ParamValue::Value(value)))
                .collect(),
        )
    }
}

impl IntoIterator for Parameters {
    type Item = (String, ParamValue);
    type IntoIter = std::vec::IntoIter<(String, ParamValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Parameters partitioned by where they travel on the wire.
///
/// Exactly one of `json` and `query` can be non-empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Buckets {
    /// JSON body
    pub json: Map<String, Value>,
    /// Query string
    pub query: Map<String, Value>,
    /// Multipart uploads
    pub files: Vec<(String, FilePart)>,
}

impl Buckets {
    pub(crate) fn into_form(self) -> Result<Form> {
        self.files
            .into_iter()
            .try_fold(Form::new(), |form, (name, file)| {
                Ok::<_, Error>(form.part(name, file.into_part()?))
            })
    }
}

/// Partition parameters into the JSON, query and file buckets.
///
/// Files always go to the file bucket. A POST without files sends every
/// other parameter as JSON; a GET, or a POST carrying files, sends them in
/// the query string.
///
/// # Example
///
/// ```
/// use hg_api_client::client::{create_data, HttpMethod, Parameters};
///
/// let buckets = create_data(Parameters::new().with("a", 1), HttpMethod::Post);
/// assert_eq!(buckets.json.len(), 1);
/// assert!(buckets.query.is_empty());
/// ```
pub fn create_data(parameters: Parameters, method: HttpMethod) -> Buckets {
    let mut buckets = Buckets::default();

    for (name, value) in parameters {
        match value {
            ParamValue::File(file) => buckets.files.push((name, file)),
            ParamValue::Value(value) => {
                buckets.query.insert(name, value);
            }
        }
    }

    if method == HttpMethod::Post && buckets.files.is_empty() {
        buckets.json = std::mem::take(&mut buckets.query);
    }

    buckets
}

/// Per-call request descriptor.
///
/// # Example
///
/// ```
/// use hg_api_client::client::{ApiRequest, Parameters};
///
/// let request = ApiRequest::get("/")
///     .with_parameters(Parameters::new().with("searchString", "pizza"))
///     .with_response_key("records");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub(crate) method: HttpMethod,
    pub(crate) path: String,
    pub(crate) parameters: Parameters,
    pub(crate) content_type: Option<String>,
    pub(crate) response_key: Option<String>,
}

impl Default for ApiRequest {
    fn default() -> Self {
        Self::new(HttpMethod::Get, "/")
    }
}

impl ApiRequest {
    /// Create a request for `path`, relative to the route URL.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            parameters: Parameters::new(),
            content_type: None,
            response_key: None,
        }
    }

    /// GET `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// POST `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Set the parameters.
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Send an explicit `Content-Type` header.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Project this key out of the decoded response.
    pub fn with_response_key(mut self, key: impl Into<String>) -> Self {
        self.response_key = Some(key.into());
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// The path suffix.
    pub fn path(&self) -> &str {
        &self.path
    }
}
