//! Routing module
//!
//! Turns a directory of handler sources into an exact-match routing table:
//! - Static module registry (what each source file provides)
//! - File tree discovery with duplicate detection
//! - Per-route method introspection

mod discovery;
mod registry;
mod table;

pub use discovery::{discover_routes, file_path_to_route, module_key};
pub use registry::ModuleRegistry;
pub use table::{join_methods, RouteEntry, RoutingTable};

use std::path::PathBuf;

/// Fatal discovery failure; aborts startup before any connection is accepted
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("function root {} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },
    #[error("failed to read {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no function module registered for {source_path} (expected key `{key}`)")]
    UnregisteredModule { source_path: String, key: String },
    #[error("duplicate route detected for {route_path}: {first} and {second}")]
    DuplicateRoute {
        route_path: String,
        first: String,
        second: String,
    },
}
