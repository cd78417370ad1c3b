//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, context
//! extraction, dispatch to the file server and access logging.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
///
/// Owned so that nothing borrowed from the request lives across file I/O.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// Raw (still percent-encoded) URL path
    pub path: String,
    pub query: Option<String>,
    pub is_head: bool,
    pub if_modified_since: Option<String>,
    pub has_if_none_match: bool,
    pub range_header: Option<String>,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string)
        };
        Self {
            path: req.uri().path().to_string(),
            query: req.uri().query().map(ToString::to_string),
            is_head: req.method() == Method::HEAD,
            if_modified_since: header("if-modified-since"),
            has_if_none_match: req.headers().contains_key("if-none-match"),
            range_header: header("range"),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let entry = state.access_log.then(|| {
        AccessLogEntry::new(
            peer_addr.ip(),
            req.method().to_string(),
            req.uri().to_string(),
            format!("{:?}", req.version()),
        )
    });

    let response = if matches!(*req.method(), Method::GET | Method::HEAD) {
        let ctx = RequestContext::from_request(&req);
        static_files::serve_path(&ctx, &state).await
    } else {
        logger::log_warning(&format!("Unsupported method: {}", req.method()));
        http::build_501_response()
    };

    if let Some(mut entry) = entry {
        entry.status = response.status().as_u16();
        entry.body_bytes = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        logger::log_access(&entry);
    }

    Ok(response)
}
