//! Routing table built by discovery

use hyper::Method;
use std::collections::HashMap;
use std::sync::Arc;

use super::DiscoveryError;
use crate::handler::FunctionModule;

/// One discovered route
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// Canonical URL path, the table key
    pub route_path: String,
    /// Discovery-relative source file, diagnostics only
    pub source_path: String,
    pub module: Arc<FunctionModule>,
    /// Checklist methods the module handles, in checklist order
    pub supported_methods: Vec<Method>,
}

impl RouteEntry {
    /// Value of the `Allow` header for this route
    pub fn allow_header(&self) -> String {
        join_methods(&self.supported_methods)
    }
}

/// Join methods the way the `Allow` header lists them
pub fn join_methods(methods: &[Method]) -> String {
    methods
        .iter()
        .map(Method::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Exact-match map from route path to entry; immutable once serving starts
#[derive(Debug, Default)]
pub struct RoutingTable {
    routes: HashMap<String, RouteEntry>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, rejecting a route path that is already taken
    pub fn insert(&mut self, entry: RouteEntry) -> Result<(), DiscoveryError> {
        if let Some(existing) = self.routes.get(&entry.route_path) {
            return Err(DiscoveryError::DuplicateRoute {
                route_path: entry.route_path,
                first: existing.source_path.clone(),
                second: entry.source_path,
            });
        }
        self.routes.insert(entry.route_path.clone(), entry);
        Ok(())
    }

    pub fn get(&self, route_path: &str) -> Option<&RouteEntry> {
        self.routes.get(route_path)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Entries sorted by route path
    pub fn entries(&self) -> Vec<&RouteEntry> {
        let mut entries: Vec<_> = self.routes.values().collect();
        entries.sort_by(|a, b| a.route_path.cmp(&b.route_path));
        entries
    }
}
