#![allow(dead_code)]

use fsroute::config::RuntimeConfig;
use fsroute::routing::ModuleRegistry;
use fsroute::{functions, start_server, RunningServer};
use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::client::conn::http1;
use hyper::header::HOST;
use hyper::{HeaderMap, Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpStream;

/// Config serving the built-in functions on an ephemeral loopback port
pub fn test_config() -> RuntimeConfig {
    let mut config = RuntimeConfig::default();
    config.server.port = 0;
    config.functions.root = concat!(env!("CARGO_MANIFEST_DIR"), "/api").to_string();
    config.logging.access_log = false;
    config
}

/// A fully buffered response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Real server on an ephemeral port plus a minimal HTTP/1.1 client
pub struct RuntimeHarness {
    server: RunningServer,
}

impl RuntimeHarness {
    pub async fn start() -> Self {
        Self::start_with(&test_config(), &functions::registry()).await
    }

    pub async fn start_with(config: &RuntimeConfig, registry: &ModuleRegistry) -> Self {
        let server = start_server(config, registry)
            .await
            .expect("server failed to start");
        Self { server }
    }

    pub fn port(&self) -> u16 {
        self.server.port()
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, &[], "").await
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> TestResponse {
        let addr = self.server.local_addr();
        let stream = TcpStream::connect(addr).await.expect("connect failed");
        let (mut sender, conn) = http1::handshake(TokioIo::new(stream))
            .await
            .expect("handshake failed");
        tokio::spawn(conn);

        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(HOST, addr.to_string());
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder
            .body(Full::new(Bytes::from(body.to_string())))
            .expect("invalid test request");

        let response = sender.send_request(request).await.expect("request failed");
        let (parts, body) = response.into_parts();
        let body = body.collect().await.expect("body read failed").to_bytes();

        TestResponse {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    pub async fn close(self) {
        self.server.close().await;
    }
}
