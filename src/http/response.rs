//! Response adapter
//!
//! Turns a [`FunctionResponse`] into the hyper response written on the
//! connection. A null body becomes an [`Empty`] body so no body bytes are
//! framed; any other body is fully materialized into a [`Full`] body.

use http_body_util::{Either, Empty, Full};
use hyper::body::Bytes;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};

use super::{AdapterError, FunctionResponse};

/// Body type of every response the runtime writes
pub type ResponseBody = Either<Full<Bytes>, Empty<Bytes>>;

/// Last-resort payload when even the classified error cannot be rendered
const MINIMAL_ERROR_BODY: &str =
    r#"{"errorCode":"HANDLER_EXCEPTION","message":"Internal runtime failure"}"#;

/// Convert a standard response into a hyper response
///
/// Every header entry is replayed, so multi-value headers go out as repeated
/// lines. Build failures are returned to the caller rather than swallowed.
pub fn into_hyper_response(response: FunctionResponse) -> Result<Response<ResponseBody>, AdapterError> {
    let (status, headers, body) = response.into_parts();

    let mut builder = Response::builder().status(status);
    for (name, value) in &headers {
        builder = builder.header(name, value);
    }

    let body = body.map_or_else(
        || Either::Right(Empty::new()),
        |bytes| Either::Left(Full::new(bytes)),
    );

    Ok(builder.body(body)?)
}

/// Hard-coded 500 used when rendering a classified error failed
pub fn minimal_error_response() -> Response<ResponseBody> {
    let mut response = Response::new(Either::Left(Full::new(Bytes::from_static(
        MINIMAL_ERROR_BODY.as_bytes(),
    ))));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
