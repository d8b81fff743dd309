//! Function module model
//!
//! A [`FunctionModule`] is what a handler source file provides: a set of async
//! handlers keyed by HTTP method. Modules are built once and stay alive for the
//! whole process, so any state a handler closes over persists between
//! invocations.

use hyper::Method;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::http::{FunctionRequest, FunctionResponse};

/// Methods checked, in order, when introspecting a module
pub const METHOD_CHECKLIST: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

pub type HandlerFuture = Pin<Box<dyn Future<Output = anyhow::Result<HandlerValue>> + Send>>;

/// Type-erased handler invocable with a request
pub type Handler = Arc<dyn Fn(FunctionRequest) -> HandlerFuture + Send + Sync>;

/// Value a handler settles with
///
/// Only [`HandlerValue::Response`] is a valid result; the dispatcher reports
/// anything else as an invalid handler response.
#[derive(Debug)]
pub enum HandlerValue {
    Response(FunctionResponse),
    Json(serde_json::Value),
    Text(String),
    Nothing,
}

impl HandlerValue {
    /// Short description used in diagnostics
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Response(_) => "response",
            Self::Json(_) => "JSON value",
            Self::Text(_) => "string",
            Self::Nothing => "nothing",
        }
    }
}

impl From<FunctionResponse> for HandlerValue {
    fn from(response: FunctionResponse) -> Self {
        Self::Response(response)
    }
}

/// Per-method handler set of one route
#[derive(Clone, Default)]
pub struct FunctionModule {
    handlers: HashMap<Method, Handler>,
}

impl FunctionModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an arbitrary method
    #[must_use]
    pub fn on<F, Fut>(mut self, method: Method, handler: F) -> Self
    where
        F: Fn(FunctionRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<HandlerValue>> + Send + 'static,
    {
        let handler: Handler =
            Arc::new(move |request: FunctionRequest| -> HandlerFuture { Box::pin(handler(request)) });
        self.handlers.insert(method, handler);
        self
    }

    #[must_use]
    pub fn get<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(FunctionRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<HandlerValue>> + Send + 'static,
    {
        self.on(Method::GET, handler)
    }

    #[must_use]
    pub fn post<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(FunctionRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<HandlerValue>> + Send + 'static,
    {
        self.on(Method::POST, handler)
    }

    #[must_use]
    pub fn put<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(FunctionRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<HandlerValue>> + Send + 'static,
    {
        self.on(Method::PUT, handler)
    }

    #[must_use]
    pub fn patch<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(FunctionRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<HandlerValue>> + Send + 'static,
    {
        self.on(Method::PATCH, handler)
    }

    #[must_use]
    pub fn delete<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(FunctionRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<HandlerValue>> + Send + 'static,
    {
        self.on(Method::DELETE, handler)
    }

    #[must_use]
    pub fn head<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(FunctionRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<HandlerValue>> + Send + 'static,
    {
        self.on(Method::HEAD, handler)
    }

    #[must_use]
    pub fn options<F, Fut>(self, handler: F) -> Self
    where
        F: Fn(FunctionRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<HandlerValue>> + Send + 'static,
    {
        self.on(Method::OPTIONS, handler)
    }

    /// Handler registered for the exact method, if any
    pub fn handler(&self, method: &Method) -> Option<Handler> {
        self.handlers.get(method).cloned()
    }

    /// Checklist methods this module handles, in checklist order
    pub fn supported_methods(&self) -> Vec<Method> {
        METHOD_CHECKLIST
            .iter()
            .filter(|method| self.handlers.contains_key(*method))
            .cloned()
            .collect()
    }
}

impl fmt::Debug for FunctionModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&str> = self.handlers.keys().map(Method::as_str).collect();
        methods.sort_unstable();
        f.debug_struct("FunctionModule")
            .field("methods", &methods)
            .finish()
    }
}
