//! Local runtime for file-system-routed HTTP functions
//!
//! Handler modules under a function root (`api/` by default) become exact
//! URL routes: `api/users/index.rs` serves `/api/users`. Each request is
//! adapted into a [`http::FunctionRequest`], dispatched to the module's
//! handler for the request method under an invocation timeout, and the
//! handler's [`http::FunctionResponse`] (or a classified error) is written
//! back on the connection.

pub mod config;
pub mod dispatch;
pub mod functions;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;

pub use config::RuntimeConfig;
pub use server::{start_server, RunningServer, StartupError};
