//! Echoes the request body back with request metadata in `x-echo-*` headers

use hyper::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use hyper::StatusCode;

use crate::handler::{FunctionModule, HandlerValue};
use crate::http::{FunctionRequest, FunctionResponse};

async fn post(request: FunctionRequest) -> anyhow::Result<HandlerValue> {
    let body = request.body().cloned().unwrap_or_default();
    let mut response = FunctionResponse::new(StatusCode::CREATED, Some(body))
        .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
        .with_header(HeaderName::from_static("x-echo-method"), HeaderValue::from_str(request.method().as_str())?)
        .with_header(HeaderName::from_static("x-echo-path"), HeaderValue::from_str(request.path())?);

    if let Some(client_id) = request.headers().get("x-client-id") {
        response = response.with_header(HeaderName::from_static("x-echo-client-id"), client_id.clone());
    }

    Ok(response.into())
}

pub fn module() -> FunctionModule {
    FunctionModule::new().post(post)
}
