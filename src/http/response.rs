//! HTTP response building module
//!
//! Builders for every status the file server emits. A builder never panics:
//! if `http` rejects a header value the error is logged and a bare response
//! with the intended status is returned.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use super::range::ByteRange;

/// Value of the `Server` response header
pub const SERVER_NAME: &str = concat!("modserve/", env!("CARGO_PKG_VERSION"));

/// Methods the file server answers
pub const ALLOWED_METHODS: &str = "GET, HEAD";

fn builder(status: StatusCode) -> hyper::http::response::Builder {
    Response::builder().status(status).header("Server", SERVER_NAME)
}

fn finish(
    builder: hyper::http::response::Builder,
    status: StatusCode,
    body: Bytes,
) -> Response<Full<Bytes>> {
    builder.body(Full::new(body)).unwrap_or_else(|e| {
        log_build_error(status, &e);
        let mut fallback = Response::new(Full::new(Bytes::new()));
        *fallback.status_mut() = status;
        fallback
    })
}

fn plain_text(status: StatusCode, message: &'static str) -> Response<Full<Bytes>> {
    let b = builder(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", message.len());
    finish(b, status, Bytes::from_static(message.as_bytes()))
}

/// Build 200 response for a whole file
///
/// `content_length` is the file size, so a HEAD request can pass an empty
/// body and still advertise the length a GET would return.
pub fn build_file_response(
    body: Bytes,
    content_length: u64,
    content_type: &str,
    last_modified: &str,
) -> Response<Full<Bytes>> {
    let b = builder(StatusCode::OK)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Last-Modified", last_modified)
        .header("Accept-Ranges", "bytes");
    finish(b, StatusCode::OK, body)
}

/// Build 206 Partial Content response; `body` is the range itself, or empty for HEAD
pub fn build_partial_response(
    body: Bytes,
    content_type: &str,
    last_modified: &str,
    range: ByteRange,
    total_size: u64,
) -> Response<Full<Bytes>> {
    let b = builder(StatusCode::PARTIAL_CONTENT)
        .header("Content-Type", content_type)
        .header("Content-Length", range.length())
        .header("Content-Range", range.content_range(total_size))
        .header("Last-Modified", last_modified)
        .header("Accept-Ranges", "bytes");
    finish(b, StatusCode::PARTIAL_CONTENT, body)
}

/// Build generated HTML response (directory listings)
pub fn build_html_response(content: String, is_head: bool) -> Response<Full<Bytes>> {
    let b = builder(StatusCode::OK)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("Content-Length", content.len());
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };
    finish(b, StatusCode::OK, body)
}

/// Build 301 redirect, used to add the trailing slash to directory URLs
pub fn build_301_response(location: &str) -> Response<Full<Bytes>> {
    let b = builder(StatusCode::MOVED_PERMANENTLY)
        .header("Location", location)
        .header("Content-Length", 0);
    finish(b, StatusCode::MOVED_PERMANENTLY, Bytes::new())
}

/// Build 304 Not Modified response
pub fn build_304_response(last_modified: &str) -> Response<Full<Bytes>> {
    let b = builder(StatusCode::NOT_MODIFIED).header("Last-Modified", last_modified);
    finish(b, StatusCode::NOT_MODIFIED, Bytes::new())
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    plain_text(StatusCode::BAD_REQUEST, "400 Bad request path")
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    plain_text(StatusCode::NOT_FOUND, "404 File not found")
}

/// Build 416 Range Not Satisfiable response
pub fn build_416_response(file_size: u64) -> Response<Full<Bytes>> {
    let b = builder(StatusCode::RANGE_NOT_SATISFIABLE)
        .header("Content-Range", format!("bytes */{file_size}"))
        .header("Content-Length", 0);
    finish(b, StatusCode::RANGE_NOT_SATISFIABLE, Bytes::new())
}

/// Build 501 Not Implemented response for methods other than GET/HEAD
pub fn build_501_response() -> Response<Full<Bytes>> {
    let message = "501 Unsupported method";
    let b = builder(StatusCode::NOT_IMPLEMENTED)
        .header("Allow", ALLOWED_METHODS)
        .header("Content-Type", "text/plain; charset=utf-8")
        .header("Content-Length", message.len());
    finish(b, StatusCode::NOT_IMPLEMENTED, Bytes::from_static(message.as_bytes()))
}

fn log_build_error(status: StatusCode, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
