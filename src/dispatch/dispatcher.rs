//! Request dispatcher
//!
//! Resolves a request to a route handler, runs the handler against the
//! invocation timeout and folds every failure into a classified error
//! response. Nothing escapes [`Dispatcher::dispatch`].

use hyper::Method;
use std::any::Any;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::{JoinError, JoinHandle};

use super::{ErrorCode, RuntimeError};
use crate::handler::{Handler, HandlerValue};
use crate::http::{normalize_method, FunctionRequest, FunctionResponse};
use crate::logger;
use crate::routing::RoutingTable;

/// Budget a handler gets before the request resolves with a timeout
pub const DEFAULT_INVOCATION_TIMEOUT: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct Dispatcher {
    routes: Arc<RoutingTable>,
    invocation_timeout: Duration,
}

impl Dispatcher {
    pub const fn new(routes: Arc<RoutingTable>, invocation_timeout: Duration) -> Self {
        Self {
            routes,
            invocation_timeout,
        }
    }

    pub const fn routes(&self) -> &Arc<RoutingTable> {
        &self.routes
    }

    pub const fn invocation_timeout(&self) -> Duration {
        self.invocation_timeout
    }

    /// Dispatch one request; failures come back as classified responses
    pub async fn dispatch(&self, request: FunctionRequest) -> FunctionResponse {
        self.dispatch_with_outcome(request).await.0
    }

    /// Like [`Self::dispatch`], also reporting the error code of a classified failure
    pub async fn dispatch_with_outcome(&self, request: FunctionRequest) -> (FunctionResponse, Option<ErrorCode>) {
        // uppercasing a valid token always yields a valid token
        let method = normalize_method(request.method()).unwrap_or_else(|_| request.method().clone());
        let path = request.path().to_string();

        match self.resolve_and_invoke(&method, request).await {
            Ok(response) => (response, None),
            Err(error) => {
                let code = error.code();
                logger::log_dispatch_error(code.as_str(), &method, &path, &error.to_string());
                (error.into_response(), Some(code))
            }
        }
    }

    async fn resolve_and_invoke(
        &self,
        method: &Method,
        request: FunctionRequest,
    ) -> Result<FunctionResponse, RuntimeError> {
        let path = request.path();
        let entry = self
            .routes
            .get(path)
            .ok_or_else(|| RuntimeError::RouteNotFound {
                path: path.to_string(),
            })?;

        let handler = entry
            .module
            .handler(method)
            .ok_or_else(|| RuntimeError::MethodNotAllowed {
                method: method.clone(),
                path: path.to_string(),
                allowed: entry.supported_methods.clone(),
            })?;

        match invoke_with_timeout(handler, request, self.invocation_timeout).await? {
            HandlerValue::Response(response) => Ok(response),
            other => Err(RuntimeError::InvalidHandlerResponse {
                found: other.kind(),
            }),
        }
    }
}

/// Aborts the handler task when dropped
///
/// Covers both timeout expiry and the dispatch future itself being dropped
/// (client gone, connection timeout). Aborting a finished task is a no-op.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Run the handler on its own task, racing it against the budget
///
/// The timer is dropped as soon as the task settles. On expiry the task is
/// aborted, so a late settlement never reaches the client.
async fn invoke_with_timeout(
    handler: Handler,
    request: FunctionRequest,
    budget: Duration,
) -> Result<HandlerValue, RuntimeError> {
    let mut invocation = AbortOnDrop(tokio::spawn(async move { handler(request).await }));

    match tokio::time::timeout(budget, &mut invocation.0).await {
        Ok(Ok(Ok(value))) => Ok(value),
        Ok(Ok(Err(error))) => Err(RuntimeError::handler_exception(format!("{error:#}"))),
        Ok(Err(join_error)) => Err(RuntimeError::handler_exception(join_error_message(join_error))),
        Err(_elapsed) => Err(RuntimeError::InvocationTimeout { budget }),
    }
}

fn join_error_message(error: JoinError) -> String {
    if error.is_panic() {
        panic_message(error.into_panic())
    } else {
        "Function handler was cancelled".to_string()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(ToString::to_string)
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_default()
}
