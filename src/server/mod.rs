// Server module entry point
// Discovery, listener binding and the accept loop lifecycle

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the module is exposed as server_loop
#[path = "loop.rs"]
pub mod server_loop;

pub use connection::{handle_connection, serve_request, ConnectionSettings};
pub use listener::create_listener;
pub use server_loop::start_server_loop;

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::config::RuntimeConfig;
use crate::dispatch::Dispatcher;
use crate::logger;
use crate::routing::{discover_routes, DiscoveryError, ModuleRegistry, RoutingTable};

/// Fatal startup failure; nothing has been served when this is returned
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("route discovery failed: {0}")]
    Discovery(#[from] DiscoveryError),
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Address(String),
}

/// Handle to a started server
#[derive(Debug)]
pub struct RunningServer {
    local_addr: SocketAddr,
    routes: Arc<RoutingTable>,
    shutdown: Arc<Notify>,
    task: JoinHandle<()>,
}

impl RunningServer {
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Bound port; differs from the configured one when that was 0
    pub const fn port(&self) -> u16 {
        self.local_addr.port()
    }

    pub const fn routes(&self) -> &Arc<RoutingTable> {
        &self.routes
    }

    /// Stop accepting connections and wait for the accept loop to exit
    ///
    /// In-flight connections are not interrupted.
    pub async fn close(self) {
        self.shutdown.notify_one();
        if let Err(e) = self.task.await {
            logger::log_error(&format!("Server loop terminated abnormally: {e}"));
        }
    }
}

/// Discover routes, bind the listener and start accepting connections
///
/// Discovery completes before the listener is bound, so a broken function
/// tree never serves a single request.
pub async fn start_server(
    config: &RuntimeConfig,
    registry: &ModuleRegistry,
) -> Result<RunningServer, StartupError> {
    let routes = Arc::new(discover_routes(
        Path::new(&config.functions.root),
        registry,
        &config.functions.extensions,
    )?);
    logger::log_routes(&routes);

    let addr = config.get_socket_addr().map_err(StartupError::Address)?;
    let listener = create_listener(addr).map_err(|source| StartupError::Bind { addr, source })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| StartupError::Bind { addr, source })?;

    logger::log_server_start(&local_addr, config, routes.len());

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&routes),
        config.invocation_timeout(),
    ));
    let settings = Arc::new(ConnectionSettings {
        keep_alive: config.server.keep_alive,
        timeout: config.connection_timeout(),
        access_log_format: config
            .logging
            .access_log
            .then(|| config.logging.access_log_format.clone()),
    });
    let shutdown = Arc::new(Notify::new());

    let task = tokio::spawn(start_server_loop(
        listener,
        dispatcher,
        settings,
        Arc::clone(&shutdown),
    ));

    Ok(RunningServer {
        local_addr,
        routes,
        shutdown,
        task,
    })
}
