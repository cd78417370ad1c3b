//! MIME type detection module
//!
//! Maps a request path to the Content-Type sent for it. JavaScript modules and
//! WebAssembly binaries are pinned to fixed types before the bundled
//! extension table is consulted, so the result never depends on the host's
//! MIME database.

use std::collections::HashMap;

/// Content-Type for `.js` and `.mjs`
pub const JAVASCRIPT: &str = "application/javascript";
/// Content-Type for `.wasm`
pub const WASM: &str = "application/wasm";
/// Fallback for unknown or missing extensions
pub const OCTET_STREAM: &str = "application/octet-stream";

const MODULE_TYPES: [(&str, &str); 3] = [("js", JAVASCRIPT), ("mjs", JAVASCRIPT), ("wasm", WASM)];

/// Per-file content type lookup used by the file server.
///
/// Implementations must be pure: the same path always yields the same,
/// non-empty type.
pub trait ContentTypeResolver: Send + Sync {
    fn resolve_content_type(&self, path: &str) -> &'static str;
}

/// Immutable extension to MIME type table.
///
/// Built once at startup and shared read-only between connections.
#[derive(Debug, Clone)]
pub struct MimeTable {
    overrides: HashMap<&'static str, &'static str>,
}

impl MimeTable {
    pub fn new() -> Self {
        Self {
            overrides: MODULE_TYPES.into_iter().collect(),
        }
    }

    /// Look up a lowercase extension (without the dot)
    ///
    /// # Examples
    /// ```
    /// use modserve::http::mime::MimeTable;
    /// let table = MimeTable::new();
    /// assert_eq!(table.lookup("mjs"), "application/javascript");
    /// assert_eq!(table.lookup("css"), "text/css");
    /// ```
    pub fn lookup(&self, ext: &str) -> &'static str {
        if let Some(pinned) = self.overrides.get(ext) {
            return *pinned;
        }
        mime_guess::from_ext(ext).first_raw().unwrap_or(OCTET_STREAM)
    }
}

impl Default for MimeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypeResolver for MimeTable {
    fn resolve_content_type(&self, path: &str) -> &'static str {
        match extension(path) {
            Some(ext) => self.lookup(&ext),
            None => OCTET_STREAM,
        }
    }
}

/// Extract the lowercase extension of the last path segment.
///
/// Leading dots belong to the file name, so `.bashrc` has no extension. A
/// trailing dot yields `None` as well.
pub fn extension(path: &str) -> Option<String> {
    let segment = path.rsplit('/').next().unwrap_or(path);
    let dot = segment.rfind('.')?;
    if segment[..dot].trim_start_matches('.').is_empty() {
        return None;
    }
    let ext = &segment[dot + 1..];
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}
