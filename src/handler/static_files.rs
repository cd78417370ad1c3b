//! Static file serving module
//!
//! Maps request paths onto the serving root, resolves directories to index
//! files or listings, and builds file responses. The Content-Type of every
//! served file comes from the resolver held in [`AppState`].

use crate::config::AppState;
use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::range::ByteRange;
use crate::http::{self, cache, response, RangeOutcome};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::fs::Metadata;
use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tokio::fs::{self, File};
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Serve a GET or HEAD request from the serving root
pub async fn serve_path(ctx: &RequestContext, state: &AppState) -> Response<Full<Bytes>> {
    let Ok(decoded) = urlencoding::decode(&ctx.path) else {
        logger::log_warning(&format!("Undecodable request path: {}", ctx.path));
        return http::build_400_response();
    };
    let fs_path = translate_path(&state.root, &decoded);

    // Missing files are routine, not worth a log line
    let Ok(metadata) = fs::metadata(&fs_path).await else {
        return http::build_404_response();
    };

    if metadata.is_dir() {
        if !ctx.path.ends_with('/') {
            return http::build_301_response(&directory_location(ctx));
        }
        for index in &state.index_files {
            let candidate = fs_path.join(index);
            if let Ok(meta) = fs::metadata(&candidate).await {
                if meta.is_file() {
                    let request_path = format!("{decoded}{index}");
                    return serve_file(ctx, state, &candidate, &request_path, &meta).await;
                }
            }
        }
        return listing::serve_listing(ctx, &fs_path, &decoded).await;
    }

    // A trailing slash names a directory, never a file
    if ctx.path.ends_with('/') {
        return http::build_404_response();
    }

    serve_file(ctx, state, &fs_path, &decoded, &metadata).await
}

/// Map a decoded URL path onto the serving root.
///
/// Empty, `.` and `..` segments are discarded, so the result always stays
/// under `root` and `/a/../b` maps to `<root>/a/b`. Segments containing a
/// backslash are skipped so they cannot act as separators on Windows.
pub fn translate_path(root: &Path, url_path: &str) -> PathBuf {
    let mut segments: Vec<&str> = Vec::new();
    for segment in url_path.split('/') {
        match segment {
            "" | "." | ".." => {}
            s if s.contains('\\') => {}
            s => segments.push(s),
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);
    path
}

/// Redirect target for a directory requested without its trailing slash
fn directory_location(ctx: &RequestContext) -> String {
    match ctx.query.as_deref() {
        Some(q) => format!("{}/?{q}", ctx.path),
        None => format!("{}/", ctx.path),
    }
}

/// Serve a regular file with conditional and Range support
///
/// The length comes from `metadata`. HEAD requests never read the file and a
/// Range request reads only the requested slice.
async fn serve_file(
    ctx: &RequestContext,
    state: &AppState,
    file_path: &Path,
    request_path: &str,
    metadata: &Metadata,
) -> Response<Full<Bytes>> {
    // Opened up front so an unreadable file is a 404 for HEAD as well
    let mut file = match File::open(file_path).await {
        Ok(f) => f,
        Err(e) => return read_failed(file_path, &e),
    };

    let content_type = state.resolver.resolve_content_type(request_path);
    let mtime = metadata.modified().unwrap_or_else(|_| SystemTime::now());
    let last_modified = cache::format_last_modified(mtime);

    if cache::is_not_modified(ctx.if_modified_since.as_deref(), ctx.has_if_none_match, mtime) {
        return http::build_304_response(&last_modified);
    }

    let total_size = metadata.len();
    match http::parse_range_header(ctx.range_header.as_deref(), total_size) {
        RangeOutcome::Partial(range) => {
            let body = if ctx.is_head {
                Bytes::new()
            } else {
                match read_range(&mut file, range).await {
                    Ok(data) => data,
                    Err(e) => return read_failed(file_path, &e),
                }
            };
            response::build_partial_response(body, content_type, &last_modified, range, total_size)
        }
        RangeOutcome::Unsatisfiable => http::build_416_response(total_size),
        RangeOutcome::Full if ctx.is_head => {
            response::build_file_response(Bytes::new(), total_size, content_type, &last_modified)
        }
        RangeOutcome::Full => {
            let mut data = Vec::with_capacity(usize::try_from(total_size).unwrap_or(0));
            if let Err(e) = file.read_to_end(&mut data).await {
                return read_failed(file_path, &e);
            }
            // The file may have changed since `metadata` was taken
            let length = u64::try_from(data.len()).unwrap_or(u64::MAX);
            response::build_file_response(Bytes::from(data), length, content_type, &last_modified)
        }
    }
}

/// Read exactly the bytes covered by `range`
async fn read_range(file: &mut File, range: ByteRange) -> io::Result<Bytes> {
    let length = usize::try_from(range.length())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "range too large"))?;
    file.seek(SeekFrom::Start(range.start)).await?;
    let mut buf = vec![0u8; length];
    file.read_exact(&mut buf).await?;
    Ok(Bytes::from(buf))
}

fn read_failed(file_path: &Path, error: &io::Error) -> Response<Full<Bytes>> {
    logger::log_warning(&format!(
        "Failed to read file '{}': {error}",
        file_path.display()
    ));
    http::build_404_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::http::MimeTable;
    use http_body_util::BodyExt;
    use hyper::StatusCode;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn fixture() -> (TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.mjs"), "export default 1;\n").unwrap();
        std::fs::write(dir.path().join("module.wasm"), b"\0asm\x01\0\0\0").unwrap();
        std::fs::create_dir(dir.path().join("site")).unwrap();
        std::fs::write(dir.path().join("site/index.html"), "<h1>hi</h1>").unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets/a.css"), "body{}").unwrap();

        let mut cfg = Config::load(None).unwrap();
        cfg.files.root = dir.path().to_path_buf();
        let state = AppState::new(&cfg, Arc::new(MimeTable::new()));
        (dir, state)
    }

    fn get(path: &str) -> RequestContext {
        let (path, query) = match path.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (path.to_string(), None),
        };
        RequestContext {
            path,
            query,
            ..RequestContext::default()
        }
    }

    async fn body(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[test]
    fn test_translate_path() {
        let root = Path::new("/srv");
        assert_eq!(translate_path(root, "/a/b.js"), PathBuf::from("/srv/a/b.js"));
        assert_eq!(translate_path(root, "/../../etc/passwd"), PathBuf::from("/srv/etc/passwd"));
        assert_eq!(translate_path(root, "/a/../b"), PathBuf::from("/srv/a/b"));
        assert_eq!(translate_path(root, "/pkg/../index.html"), PathBuf::from("/srv/pkg/index.html"));
        assert_eq!(translate_path(root, "//./x//"), PathBuf::from("/srv/x"));
        assert_eq!(translate_path(root, "/"), PathBuf::from("/srv"));
        assert_eq!(translate_path(root, "/..\\secret"), PathBuf::from("/srv"));
    }

    #[tokio::test]
    async fn test_serves_module_and_wasm() {
        let (_dir, state) = fixture();
        let resp = serve_path(&get("/app.mjs"), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/javascript");
        assert!(resp.headers().contains_key("last-modified"));

        let resp = serve_path(&get("/module.wasm"), &state).await;
        assert_eq!(resp.headers()["content-type"], "application/wasm");
        assert_eq!(body(resp).await.len(), 8);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let (_dir, state) = fixture();
        let resp = serve_path(&get("/missing.xyz"), &state).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_percent_decoded_path() {
        let (dir, state) = fixture();
        std::fs::write(dir.path().join("my file.js"), "1").unwrap();
        let resp = serve_path(&get("/my%20file.js"), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "application/javascript");

        let resp = serve_path(&get("/%FF.js"), &state).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_directory_redirect_keeps_query() {
        let (_dir, state) = fixture();
        let resp = serve_path(&get("/site?lang=en"), &state).await;
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()["location"], "/site/?lang=en");
    }

    #[tokio::test]
    async fn test_directory_index() {
        let (_dir, state) = fixture();
        let resp = serve_path(&get("/site/"), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html");
        assert_eq!(body(resp).await, Bytes::from_static(b"<h1>hi</h1>"));
    }

    #[tokio::test]
    async fn test_directory_listing_without_index() {
        let (_dir, state) = fixture();
        let resp = serve_path(&get("/assets/"), &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-type"], "text/html; charset=utf-8");
        let html = String::from_utf8(body(resp).await.to_vec()).unwrap();
        assert!(html.contains("a.css"));
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash() {
        let (_dir, state) = fixture();
        let resp = serve_path(&get("/app.mjs/"), &state).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let (_dir, state) = fixture();
        let mut ctx = get("/app.mjs");
        ctx.is_head = true;
        let resp = serve_path(&ctx, &state).await;
        assert_eq!(resp.headers()["content-length"], "18");
        assert!(body(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_range_request() {
        let (_dir, state) = fixture();
        let mut ctx = get("/module.wasm");
        ctx.range_header = Some("bytes=0-3".to_string());
        let resp = serve_path(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers()["content-type"], "application/wasm");
        assert_eq!(body(resp).await, Bytes::from_static(b"\0asm"));

        ctx.range_header = Some("bytes=100-".to_string());
        let resp = serve_path(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::RANGE_NOT_SATISFIABLE);
    }

    #[tokio::test]
    async fn test_range_reads_only_the_slice() {
        let (_dir, state) = fixture();
        let mut ctx = get("/module.wasm");
        ctx.range_header = Some("bytes=4-5".to_string());
        let resp = serve_path(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers()["content-range"], "bytes 4-5/8");
        assert_eq!(resp.headers()["content-length"], "2");
        assert_eq!(body(resp).await, Bytes::from_static(b"\x01\0"));

        ctx.range_header = Some("bytes=-3".to_string());
        let resp = serve_path(&ctx, &state).await;
        assert_eq!(resp.headers()["content-range"], "bytes 5-7/8");
        assert_eq!(body(resp).await, Bytes::from_static(b"\0\0\0"));
    }

    #[tokio::test]
    async fn test_head_range_has_headers_only() {
        let (_dir, state) = fixture();
        let mut ctx = get("/module.wasm");
        ctx.is_head = true;
        ctx.range_header = Some("bytes=2-".to_string());
        let resp = serve_path(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::PARTIAL_CONTENT);
        assert_eq!(resp.headers()["content-length"], "6");
        assert_eq!(resp.headers()["content-range"], "bytes 2-7/8");
        assert!(body(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_head_length_of_large_file() {
        let (dir, state) = fixture();
        let big = std::fs::File::create(dir.path().join("big.wasm")).unwrap();
        big.set_len(64 * 1024 * 1024).unwrap();
        let mut ctx = get("/big.wasm");
        ctx.is_head = true;
        let resp = serve_path(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()["content-length"], "67108864");
        assert!(body(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_if_modified_since() {
        let (_dir, state) = fixture();
        let mut ctx = get("/app.mjs");
        ctx.if_modified_since = Some(httpdate::fmt_http_date(
            SystemTime::now() + std::time::Duration::from_secs(3600),
        ));
        let resp = serve_path(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::NOT_MODIFIED);

        ctx.has_if_none_match = true;
        let resp = serve_path(&ctx, &state).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
