//! Runtime error classification
//!
//! The taxonomy is closed: every dispatch-time failure maps to exactly one
//! [`ErrorCode`], each bound to one HTTP status. Error responses carry a JSON
//! body with `errorCode` and `message`.

use hyper::body::Bytes;
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{HeaderMap, Method, StatusCode};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::http::FunctionResponse;
use crate::logger;
use crate::routing::join_methods;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    RouteNotFound,
    MethodNotAllowed,
    HandlerException,
    InvalidHandlerResponse,
    InvocationTimeout,
}

impl ErrorCode {
    pub const ALL: [Self; 5] = [
        Self::RouteNotFound,
        Self::MethodNotAllowed,
        Self::HandlerException,
        Self::InvalidHandlerResponse,
        Self::InvocationTimeout,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::HandlerException => "HANDLER_EXCEPTION",
            Self::InvalidHandlerResponse => "INVALID_HANDLER_RESPONSE",
            Self::InvocationTimeout => "INVOCATION_TIMEOUT",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::HandlerException | Self::InvalidHandlerResponse => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::InvocationTimeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A code string outside the taxonomy; always a runtime bug
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported runtime error code: {0}")]
pub struct UnknownErrorCode(pub String);

impl FromStr for ErrorCode {
    type Err = UnknownErrorCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| UnknownErrorCode(s.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    error_code: ErrorCode,
    message: &'a str,
}

/// Build the error response for a code
///
/// `content-type` defaults to `application/json` unless `extra_headers`
/// already sets one.
pub fn classify(code: ErrorCode, message: &str, extra_headers: HeaderMap) -> FunctionResponse {
    let mut headers = extra_headers;
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    let body = match serde_json::to_vec(&ErrorBody {
        error_code: code,
        message,
    }) {
        Ok(body) => body,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize {code} body: {e}"));
            format!(r#"{{"errorCode":"{code}","message":"Internal runtime failure"}}"#).into_bytes()
        }
    };

    FunctionResponse::from_parts(code.status(), headers, Some(Bytes::from(body)))
}

/// Typed dispatch failure carrying the context for its message
#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    #[error("No function route matches {path}")]
    RouteNotFound { path: String },
    #[error("Method {method} is not allowed for {path}")]
    MethodNotAllowed {
        method: Method,
        path: String,
        allowed: Vec<Method>,
    },
    #[error("{message}")]
    HandlerException { message: String },
    #[error("Function handler must return a Response, got {found}")]
    InvalidHandlerResponse { found: &'static str },
    #[error("Function exceeded {}ms timeout", .budget.as_millis())]
    InvocationTimeout { budget: Duration },
}

impl RuntimeError {
    const GENERIC_EXCEPTION: &'static str = "Function handler threw an exception";

    /// Handler failure, falling back to a generic message when empty
    pub fn handler_exception(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            Self::GENERIC_EXCEPTION.to_string()
        } else {
            message
        };
        Self::HandlerException { message }
    }

    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::RouteNotFound { .. } => ErrorCode::RouteNotFound,
            Self::MethodNotAllowed { .. } => ErrorCode::MethodNotAllowed,
            Self::HandlerException { .. } => ErrorCode::HandlerException,
            Self::InvalidHandlerResponse { .. } => ErrorCode::InvalidHandlerResponse,
            Self::InvocationTimeout { .. } => ErrorCode::InvocationTimeout,
        }
    }

    fn extra_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Self::MethodNotAllowed { allowed, .. } = self {
            match HeaderValue::from_str(&join_methods(allowed)) {
                Ok(value) => {
                    headers.insert(ALLOW, value);
                }
                Err(e) => logger::log_error(&format!("Invalid Allow header value: {e}")),
            }
        }
        headers
    }

    pub fn into_response(self) -> FunctionResponse {
        classify(self.code(), &self.to_string(), self.extra_headers())
    }
}
