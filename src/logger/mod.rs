//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging
//! - Error and warning logging
//!
//! Lifecycle lines go to stdout; access, warning and error lines go to stderr.

mod format;

pub use format::AccessLogEntry;

/// Write to info log
fn write_info(message: &str) {
    println!("{message}");
}

/// Write to error log
fn write_error(message: &str) {
    eprintln!("{message}");
}

pub fn log_server_start(host: &str, port: u16) {
    write_info(&format!(
        "Serving HTTP on {host} port {port} (http://localhost:{port}/) ..."
    ));
}

pub fn log_shutdown() {
    write_info("\nShutting down");
}

pub fn log_connection_error(err: &impl std::fmt::Display) {
    write_error(&format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_access(entry: &AccessLogEntry) {
    write_error(&entry.format());
}
