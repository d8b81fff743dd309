//! Dispatch layer
//!
//! Request → handler resolution, timeout enforcement and the closed runtime
//! error taxonomy.

mod classify;
mod dispatcher;

pub use classify::{classify, ErrorCode, RuntimeError, UnknownErrorCode};
pub use dispatcher::{Dispatcher, DEFAULT_INVOCATION_TIMEOUT};
