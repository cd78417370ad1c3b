// Application state module
// Immutable per-process state shared by every connection

use std::path::PathBuf;
use std::sync::Arc;

use super::types::Config;
use crate::http::mime::ContentTypeResolver;

/// Application state
///
/// Built once before the accept loop starts and shared by `Arc`. Nothing in
/// it changes afterwards, so handlers read it without locking.
pub struct AppState {
    pub root: PathBuf,
    pub index_files: Vec<String>,
    pub resolver: Arc<dyn ContentTypeResolver>,
    pub access_log: bool,
}

impl AppState {
    pub fn new(config: &Config, resolver: Arc<dyn ContentTypeResolver>) -> Self {
        Self {
            root: config.files.root.clone(),
            index_files: config.files.index_files.clone(),
            resolver,
            access_log: config.logging.access_log,
        }
    }
}
