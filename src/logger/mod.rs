//! Logger module
//!
//! Provides logging utilities for the function runtime including:
//! - Server lifecycle logging
//! - Discovered route listing
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use hyper::Method;
use std::net::SocketAddr;

use crate::config::{LoggingConfig, RuntimeConfig};
use crate::routing::RoutingTable;

/// Initialize the logger with configuration
///
/// Should be called once at application startup. Without it every helper
/// still works and writes to stdout/stderr.
pub fn init(config: &LoggingConfig) -> std::io::Result<()> {
    writer::init(
        config.access_log_file.as_deref(),
        config.error_log_file.as_deref(),
        config.level.eq_ignore_ascii_case("debug"),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &RuntimeConfig, route_count: usize) {
    write_info("======================================");
    write_info("Function runtime started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Function root: {}", config.functions.root));
    write_info(&format!("Routes: {route_count}"));
    write_info(&format!(
        "Invocation timeout: {}ms",
        config.functions.invocation_timeout_ms
    ));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

/// One line per route: path, methods and the file serving it
pub fn log_routes(routes: &RoutingTable) {
    for entry in routes.entries() {
        write_info(&format!(
            "[Route] {} [{}] -> {}",
            entry.route_path,
            entry.allow_header(),
            entry.source_path
        ));
    }
}

pub fn log_debug(message: &str) {
    if writer::get().is_some_and(writer::LogWriter::debug_enabled) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Classified dispatch failure; the client gets the same code and message
pub fn log_dispatch_error(code: &str, method: &Method, path: &str, message: &str) {
    log_warning(&format!("[{code}] {method} {path}: {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown() {
    write_info("\n[Shutdown] Listener closed, no longer accepting connections");
}
