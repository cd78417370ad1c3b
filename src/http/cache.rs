//! HTTP cache validation module
//!
//! `Last-Modified` generation and `If-Modified-Since` handling.

use std::time::{SystemTime, UNIX_EPOCH};

/// Format a modification time as an IMF-fixdate header value
pub fn format_last_modified(mtime: SystemTime) -> String {
    httpdate::fmt_http_date(mtime)
}

/// Check whether a conditional GET can be answered with 304
///
/// `If-Modified-Since` is ignored when the client also sent `If-None-Match`,
/// and an unparsable date is treated as absent. HTTP dates only carry whole
/// seconds, so the file time is truncated before comparing.
///
/// # Arguments
/// * `if_modified_since` - Client-sent If-Modified-Since header
/// * `has_if_none_match` - Whether an If-None-Match header was present
/// * `mtime` - File modification time
pub fn is_not_modified(
    if_modified_since: Option<&str>,
    has_if_none_match: bool,
    mtime: SystemTime,
) -> bool {
    if has_if_none_match {
        return false;
    }
    let Some(since) = if_modified_since.and_then(|v| httpdate::parse_http_date(v.trim()).ok())
    else {
        return false;
    };
    unix_seconds(mtime) <= unix_seconds(since)
}

fn unix_seconds(t: SystemTime) -> u64 {
    t.duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs())
}
