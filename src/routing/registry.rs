//! Static module registry
//!
//! Modules are registered once at startup under the key of the source file
//! that declares them: the discovery-relative path without its extension
//! (`api/users/index` for `api/users/index.rs`). Discovery resolves every file
//! it finds against this registry instead of loading code at runtime.

use std::collections::HashMap;
use std::sync::Arc;

use crate::handler::FunctionModule;
use crate::logger;

#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Arc<FunctionModule>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under its source key
    ///
    /// Registering the same key twice keeps the latest module.
    pub fn register(&mut self, key: &str, module: FunctionModule) -> &mut Self {
        let key = normalize_key(key);
        if self.modules.insert(key.clone(), Arc::new(module)).is_some() {
            logger::log_warning(&format!("Module `{key}` registered twice, keeping the latest"));
        }
        self
    }

    /// Builder-style variant of [`Self::register`]
    #[must_use]
    pub fn with(mut self, key: &str, module: FunctionModule) -> Self {
        self.register(key, module);
        self
    }

    pub fn resolve(&self, key: &str) -> Option<Arc<FunctionModule>> {
        self.modules.get(&normalize_key(key)).cloned()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    let key = key.replace('\\', "/");
    key.strip_prefix("./").unwrap_or(&key).to_string()
}
