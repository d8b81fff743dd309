// Server loop module
// Accepts connections until a shutdown signal arrives

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::{handle_connection, ConnectionSettings};
use crate::dispatch::Dispatcher;
use crate::logger;

/// Accept loop: one spawned task per connection
///
/// Returns once `shutdown` is notified; the listener is dropped then, while
/// connections already accepted run to completion on their own tasks.
#[allow(clippy::ignored_unit_patterns)]
pub async fn start_server_loop(
    listener: TcpListener,
    dispatcher: Arc<Dispatcher>,
    settings: Arc<ConnectionSettings>,
    shutdown: Arc<Notify>,
) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        handle_connection(
                            stream,
                            peer_addr,
                            Arc::clone(&dispatcher),
                            Arc::clone(&settings),
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = shutdown.notified() => {
                logger::log_shutdown();
                break;
            }
        }
    }
}
