// Configuration module entry point
// Builds the process configuration from defaults and the command line

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::{Result, ServerError};

// Re-export public types
pub use state::AppState;
pub use types::{Config, FilesConfig, LoggingConfig, ServerConfig};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

impl Config {
    /// Build configuration from process arguments (`<program> [PORT]`)
    ///
    /// The first item is the program name. A missing port falls back to
    /// [`DEFAULT_PORT`]; a present but invalid one is an error.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let program = args.next().unwrap_or_else(|| "modserve".to_string());
        let port = args.next().map(|raw| parse_port(&raw)).transpose()?;
        if args.next().is_some() {
            return Err(ServerError::Usage { program });
        }
        Self::load(port)
    }

    /// Layer the built-in defaults with an optional port override
    ///
    /// No file or environment source is registered: the port is the only
    /// setting a user can change.
    pub fn load(port: Option<u16>) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("files.root", ".")?
            .set_default("files.index_files", vec!["index.html", "index.htm"])?
            .set_default("logging.access_log", true)?
            .set_override_option("server.port", port.map(i64::from))?
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse().map_err(|_| ServerError::Address(addr))
    }
}

/// Parse a port argument; `0` is rejected since the server would not know
/// its URL before binding
pub fn parse_port(raw: &str) -> Result<u16> {
    raw.trim()
        .parse::<u16>()
        .ok()
        .filter(|port| *port != 0)
        .ok_or_else(|| ServerError::InvalidPort(raw.to_string()))
}
