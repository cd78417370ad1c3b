//! Directory listing module
//!
//! Renders an HTML index for directories that have no index file.

use crate::handler::router::RequestContext;
use crate::http::{self, response};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fmt::Write as _;
use std::path::Path;
use tokio::fs;

/// One row of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
}

impl ListingEntry {
    /// Text shown to the user: `/` marks directories, `@` marks symlinks
    pub fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{}@", self.name)
        } else if self.is_dir {
            format!("{}/", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Relative, percent-encoded link target
    pub fn href(&self) -> String {
        let encoded = urlencoding::encode(&self.name);
        if self.is_dir {
            format!("{encoded}/")
        } else {
            encoded.into_owned()
        }
    }
}

/// Serve the listing for `dir`; unreadable directories are reported as 404
pub async fn serve_listing(
    ctx: &RequestContext,
    dir: &Path,
    display_path: &str,
) -> Response<Full<Bytes>> {
    match read_entries(dir).await {
        Ok(entries) => response::build_html_response(render(display_path, &entries), ctx.is_head),
        Err(e) => {
            logger::log_warning(&format!(
                "No permission to list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response()
        }
    }
}

/// Read directory entries sorted case-insensitively by name
pub async fn read_entries(dir: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();
    while let Some(entry) = reader.next_entry().await? {
        let is_symlink = entry.file_type().await?.is_symlink();
        // Follows symlinks, so a link to a directory still gets a trailing slash
        let is_dir = fs::metadata(entry.path())
            .await
            .is_ok_and(|m| m.is_dir());
        entries.push(ListingEntry {
            name: entry.file_name().to_string_lossy().into_owned(),
            is_dir,
            is_symlink,
        });
    }
    entries.sort_by_cached_key(|e| e.name.to_lowercase());
    Ok(entries)
}

/// Render the listing page
pub fn render(display_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = format!(
        "<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"
    );
    for entry in entries {
        let _ = writeln!(
            html,
            "<li><a href=\"{}\">{}</a></li>",
            escape_html(&entry.href()),
            escape_html(&entry.display_name())
        );
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
