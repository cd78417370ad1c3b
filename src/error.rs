//! Startup error types

use std::net::SocketAddr;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ServerError>;

/// Errors that stop the server before or while it starts listening.
///
/// Per-request failures never surface here; they become HTTP statuses.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Port argument is not an integer in 1..=65535
    #[error("invalid port '{0}': expected an integer between 1 and 65535")]
    InvalidPort(String),

    /// Unexpected command line shape
    #[error("usage: {program} [PORT]")]
    Usage { program: String },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("invalid listen address '{0}'")]
    Address(String),

    /// Listening socket could not be created or bound
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// Shutdown handler could not be installed
    #[error("failed to register {signal} handler: {source}")]
    Signal {
        signal: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
