// Configuration types module
// Typed view of the layered settings

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub logging: LoggingConfig,
}

/// Listening socket configuration
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// What gets served and how directories resolve
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    /// Serving root, relative paths resolve against the working directory
    pub root: PathBuf,
    /// Tried in order when a directory is requested
    pub index_files: Vec<String>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Emit one access line per request
    pub access_log: bool,
}
