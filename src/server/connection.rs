// Connection handling module
// Serves one TCP connection and adapts each of its requests through the dispatcher

use hyper::body::{Body, Bytes};
use hyper::header::USER_AGENT;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response, Version};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::dispatch::{Dispatcher, ErrorCode, RuntimeError};
use crate::http::{
    into_hyper_response, minimal_error_response, request_origin, to_function_request,
    AdapterError, ResponseBody,
};
use crate::logger::{self, AccessLogEntry};

/// Per-connection settings shared by every connection of a listener
#[derive(Debug, Clone)]
pub struct ConnectionSettings {
    pub keep_alive: bool,
    /// Upper bound on a connection's lifetime
    pub timeout: Duration,
    /// Access log format; `None` disables access logging
    pub access_log_format: Option<String>,
}

/// Handle a single connection in a spawned task.
///
/// HTTP/1.1 with optional keep-alive; the whole connection is bounded by
/// `settings.timeout`. Errors are logged, never propagated.
pub fn handle_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    dispatcher: Arc<Dispatcher>,
    settings: Arc<ConnectionSettings>,
) {
    logger::log_connection_accepted(&peer_addr);

    tokio::spawn(async move {
        let io = TokioIo::new(stream);
        let timeout_duration = settings.timeout;

        let mut builder = http1::Builder::new();
        builder.keep_alive(settings.keep_alive);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| {
                let dispatcher = Arc::clone(&dispatcher);
                let settings = Arc::clone(&settings);
                async move {
                    Ok::<_, Infallible>(serve_request(req, peer_addr, &dispatcher, &settings).await)
                }
            }),
        );

        match tokio::time::timeout(timeout_duration, conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_warning(&format!(
                    "Connection from {peer_addr} timed out after {} seconds",
                    timeout_duration.as_secs()
                ));
            }
        }
    });
}

/// Serve one request: adapt, dispatch, adapt back
///
/// Always produces a response. An adapter failure degrades to a
/// `HANDLER_EXCEPTION` response, and to a hard-coded 500 if even that cannot
/// be rendered.
pub async fn serve_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    dispatcher: &Dispatcher,
    settings: &ConnectionSettings,
) -> Response<ResponseBody>
where
    B: Body<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let start = Instant::now();
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_label(req.version()).to_string();
    entry.user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let (response, error_code) = match adapt_and_dispatch(req, dispatcher).await {
        Ok(outcome) => outcome,
        Err(e) => {
            logger::log_error(&format!("Request adaptation failed: {e}"));
            let fallback = RuntimeError::handler_exception(e.to_string()).into_response();
            match into_hyper_response(fallback) {
                Ok(response) => (response, Some(ErrorCode::HandlerException)),
                Err(e) => {
                    logger::log_error(&format!("Failed to render error response: {e}"));
                    (minimal_error_response(), Some(ErrorCode::HandlerException))
                }
            }
        }
    };

    if let Some(format) = settings.access_log_format.as_deref() {
        entry.status = response.status().as_u16();
        entry.body_bytes = body_len(&response);
        entry.error_code = error_code.map(|code| code.as_str().to_string());
        entry.request_time_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, format);
    }

    response
}

async fn adapt_and_dispatch<B>(
    req: Request<B>,
    dispatcher: &Dispatcher,
) -> Result<(Response<ResponseBody>, Option<ErrorCode>), AdapterError>
where
    B: Body<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let origin = request_origin(req.headers());
    let request = to_function_request(req, &origin).await?;
    let (response, error_code) = dispatcher.dispatch_with_outcome(request).await;
    Ok((into_hyper_response(response)?, error_code))
}

fn body_len(response: &Response<ResponseBody>) -> usize {
    response
        .body()
        .size_hint()
        .exact()
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(0)
}

const fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
