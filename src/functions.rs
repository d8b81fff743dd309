//! Built-in functions
//!
//! Every handler source under `api/` is compiled into the binary and
//! registered here under its source key. Adding a file to `api/` without
//! registering it makes discovery fail at startup.

use crate::routing::ModuleRegistry;

#[path = "../api/bad-return.rs"]
mod bad_return;
#[path = "../api/demo-error.rs"]
mod demo_error;
#[path = "../api/demo-ok.rs"]
mod demo_ok;
#[path = "../api/demo-panic.rs"]
mod demo_panic;
#[path = "../api/demo-timeout.rs"]
mod demo_timeout;
#[path = "../api/demo-warm.rs"]
mod demo_warm;
#[path = "../api/echo.rs"]
mod echo;
#[path = "../api/fast.rs"]
mod fast;
#[path = "../api/index.rs"]
mod index;
#[path = "../api/no-content.rs"]
mod no_content;
#[path = "../api/users/index.rs"]
mod users_index;

/// Registry holding every built-in function module
pub fn registry() -> ModuleRegistry {
    ModuleRegistry::new()
        .with("api/bad-return", bad_return::module())
        .with("api/demo-error", demo_error::module())
        .with("api/demo-ok", demo_ok::module())
        .with("api/demo-panic", demo_panic::module())
        .with("api/demo-timeout", demo_timeout::module())
        .with("api/demo-warm", demo_warm::module())
        .with("api/echo", echo::module())
        .with("api/fast", fast::module())
        .with("api/index", index::module())
        .with("api/no-content", no_content::module())
        .with("api/users/index", users_index::module())
}
