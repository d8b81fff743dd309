//! Standard request/response types handed to function handlers
//!
//! These are transport-independent: the adapters in [`super::request`] and
//! [`super::response`] translate them from and to hyper messages.

use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use hyper::{HeaderMap, Method, StatusCode, Uri};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Request as seen by a function handler
#[derive(Debug, Clone)]
pub struct FunctionRequest {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl FunctionRequest {
    pub const fn new(method: Method, uri: Uri, headers: HeaderMap, body: Option<Bytes>) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Absolute URL (scheme, host, path and query)
    pub const fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn query(&self) -> Option<&str> {
        self.uri.query()
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Buffered body; always `None` for GET/HEAD and empty payloads
    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Body decoded as UTF-8 (lossy), empty string when there is no body
    pub fn text(&self) -> String {
        self.body
            .as_ref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(self.body.as_deref().unwrap_or_default())
    }
}

/// Response produced by a function handler
///
/// A `None` body is the null body: no body bytes are framed at all. This is
/// distinct from `Some` of an empty buffer, which is a zero-length body.
#[derive(Debug, Clone)]
pub struct FunctionResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl FunctionResponse {
    pub fn new(status: StatusCode, body: Option<Bytes>) -> Self {
        Self::from_parts(status, HeaderMap::new(), body)
    }

    pub const fn from_parts(status: StatusCode, headers: HeaderMap, body: Option<Bytes>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Response with the null body (204-style)
    pub fn no_body(status: StatusCode) -> Self {
        Self::new(status, None)
    }

    /// Plain text response
    pub fn text(status: StatusCode, body: impl Into<String>) -> Self {
        Self::new(status, Some(Bytes::from(body.into()))).with_header(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )
    }

    /// JSON response
    pub fn json<T: Serialize + ?Sized>(status: StatusCode, value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(Self::new(status, Some(Bytes::from(body)))
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/json")))
    }

    /// Set a header, replacing any existing values
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Add a header line, keeping existing values
    #[must_use]
    pub fn append_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub const fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn into_parts(self) -> (StatusCode, HeaderMap, Option<Bytes>) {
        (self.status, self.headers, self.body)
    }
}
