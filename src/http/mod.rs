//! HTTP adaptation layer
//!
//! Translates between hyper's connection-level messages and the standard
//! [`FunctionRequest`]/[`FunctionResponse`] pair that handlers work with.

pub mod message;
pub mod request;
pub mod response;

pub use message::{FunctionRequest, FunctionResponse};
pub use request::{request_origin, to_function_request, DEFAULT_ORIGIN};
pub use response::{into_hyper_response, minimal_error_response, ResponseBody};

use hyper::http::method::InvalidMethod;
use hyper::http::uri::InvalidUri;
use hyper::Method;

/// Uppercase a method; extension methods may arrive in any case
pub fn normalize_method(method: &Method) -> Result<Method, InvalidMethod> {
    let upper = method.as_str().to_ascii_uppercase();
    if upper == method.as_str() {
        return Ok(method.clone());
    }
    Method::from_bytes(upper.as_bytes())
}

/// Failure while adapting a message to or from the connection
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("failed to read request body: {0}")]
    Body(String),
    #[error("invalid request method: {0}")]
    Method(String),
    #[error("invalid request origin: {0}")]
    Origin(#[from] InvalidUri),
    #[error("request origin has no host")]
    MissingHost,
    #[error("failed to build message: {0}")]
    Build(#[from] hyper::http::Error),
}
