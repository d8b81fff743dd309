//! Request adapter
//!
//! Converts an incoming hyper request into a [`FunctionRequest`]. The body is
//! drained completely before the request is handed to the dispatcher.

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::header::HOST;
use hyper::http::uri::{PathAndQuery, Scheme};
use hyper::{HeaderMap, Method, Request, Uri};

use super::{normalize_method, AdapterError, FunctionRequest};

/// Origin used when the request carries no `Host` header
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Derive the request origin from the `Host` header
pub fn request_origin(headers: &HeaderMap) -> String {
    headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|host| !host.is_empty())
        .map_or_else(|| DEFAULT_ORIGIN.to_string(), |host| format!("http://{host}"))
}

/// Build the standard request from a raw hyper request
///
/// Header lines are carried over as delivered, duplicates included. A body is
/// only attached for methods other than GET/HEAD and only when non-empty.
pub async fn to_function_request<B>(
    request: Request<B>,
    origin: &str,
) -> Result<FunctionRequest, AdapterError>
where
    B: Body<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let (parts, body) = request.into_parts();
    let method = normalize_method(&parts.method)
        .map_err(|_| AdapterError::Method(parts.method.to_string()))?;
    let uri = resolve_url(&parts.uri, origin)?;

    let bytes = body
        .collect()
        .await
        .map_err(|e| AdapterError::Body(e.to_string()))?
        .to_bytes();

    let carries_body = !matches!(method, Method::GET | Method::HEAD) && !bytes.is_empty();
    let body = carries_body.then_some(bytes);

    Ok(FunctionRequest::new(method, uri, parts.headers, body))
}

/// Resolve the request target against the origin into an absolute URL
fn resolve_url(target: &Uri, origin: &str) -> Result<Uri, AdapterError> {
    let origin: Uri = origin.parse()?;
    let scheme = origin.scheme().cloned().unwrap_or(Scheme::HTTP);
    let authority = origin.authority().cloned().ok_or(AdapterError::MissingHost)?;
    let path_and_query = target
        .path_and_query()
        .cloned()
        .unwrap_or_else(|| PathAndQuery::from_static("/"));

    Ok(Uri::builder()
        .scheme(scheme)
        .authority(authority)
        .path_and_query(path_and_query)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::Full;

    fn raw(method: &str, target: &str, body: &'static str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(target)
            .header("host", "example.test:8080")
            .body(Full::new(Bytes::from_static(body.as_bytes())))
            .unwrap()
    }

    #[test]
    fn test_origin_from_host() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, "api.local:3000".parse().unwrap());
        assert_eq!(request_origin(&headers), "http://api.local:3000");
    }

    #[test]
    fn test_origin_fallback() {
        assert_eq!(request_origin(&HeaderMap::new()), DEFAULT_ORIGIN);
    }

    #[tokio::test]
    async fn test_absolute_url_with_query() {
        let req = to_function_request(raw("GET", "/api/users?page=2", ""), "http://example.test:8080")
            .await
            .unwrap();
        assert_eq!(req.uri().to_string(), "http://example.test:8080/api/users?page=2");
        assert_eq!(req.path(), "/api/users");
    }

    #[tokio::test]
    async fn test_post_body_is_attached() {
        let req = to_function_request(raw("POST", "/api/echo", "ping=1"), DEFAULT_ORIGIN)
            .await
            .unwrap();
        assert_eq!(*req.method(), Method::POST);
        assert_eq!(req.body().unwrap().as_ref(), b"ping=1");
    }

    #[tokio::test]
    async fn test_get_and_head_never_carry_body() {
        for method in ["GET", "HEAD"] {
            let req = to_function_request(raw(method, "/api/echo", "ignored"), DEFAULT_ORIGIN)
                .await
                .unwrap();
            assert!(req.body().is_none(), "{method} should drop the body");
        }
    }

    #[tokio::test]
    async fn test_empty_post_body_is_absent() {
        let req = to_function_request(raw("POST", "/api/echo", ""), DEFAULT_ORIGIN)
            .await
            .unwrap();
        assert!(req.body().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_headers_preserved_in_order() {
        let raw = Request::builder()
            .uri("/api/echo")
            .header("X-Tag", "one")
            .header("x-tag", "two")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let req = to_function_request(raw, DEFAULT_ORIGIN).await.unwrap();
        let tags: Vec<_> = req.headers().get_all("x-tag").iter().collect();
        assert_eq!(tags, vec!["one", "two"]);
        assert_eq!(req.header("X-TAG"), Some("one"));
    }

    #[tokio::test]
    async fn test_lowercase_method_is_uppercased() {
        let req = to_function_request(raw("purge", "/api/cache", ""), DEFAULT_ORIGIN)
            .await
            .unwrap();
        assert_eq!(req.method().as_str(), "PURGE");
    }

    #[tokio::test]
    async fn test_invalid_origin_is_an_adapter_error() {
        let result = to_function_request(raw("GET", "/api/echo", ""), "http://bad host").await;
        assert!(result.is_err());
    }
}
