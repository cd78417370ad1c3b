//! HTTP Range request parsing module
//!
//! Single `bytes=` range parsing (RFC 7233). Multi-range requests are not
//! supported and fall back to a full response.

/// Inclusive byte range resolved against a file length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    pub const fn length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` header value
    pub fn content_range(&self, total: u64) -> String {
        format!("bytes {}-{}/{total}", self.start, self.end)
    }
}

/// What to do with a request's Range header
#[derive(Debug, PartialEq, Eq)]
pub enum RangeOutcome {
    /// Serve 206 with this slice
    Partial(ByteRange),
    /// Serve 416
    Unsatisfiable,
    /// No usable Range header, serve the whole file
    Full,
}

/// Parse a Range header against a file of `len` bytes
///
/// Supported formats:
/// - `bytes=start-end`
/// - `bytes=start-`
/// - `bytes=-suffix`
///
/// # Examples
/// ```
/// use modserve::http::range::{parse_range_header, ByteRange, RangeOutcome};
///
/// assert_eq!(
///     parse_range_header(Some("bytes=0-99"), 1000),
///     RangeOutcome::Partial(ByteRange { start: 0, end: 99 })
/// );
/// assert_eq!(parse_range_header(None, 1000), RangeOutcome::Full);
/// ```
pub fn parse_range_header(header: Option<&str>, len: u64) -> RangeOutcome {
    let Some(ranges) = header.and_then(|h| h.trim().strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    if ranges.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((first, last)) = ranges.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (first, last) = (first.trim(), last.trim());

    if first.is_empty() {
        suffix_range(last, len)
    } else {
        bounded_range(first, last, len)
    }
}

/// `-N`: the last N bytes
fn suffix_range(suffix: &str, len: u64) -> RangeOutcome {
    let Ok(suffix) = suffix.parse::<u64>() else {
        return RangeOutcome::Full;
    };
    if suffix == 0 || len == 0 {
        return RangeOutcome::Unsatisfiable;
    }
    RangeOutcome::Partial(ByteRange {
        start: len.saturating_sub(suffix),
        end: len - 1,
    })
}

/// `A-` or `A-B`
fn bounded_range(first: &str, last: &str, len: u64) -> RangeOutcome {
    let Ok(start) = first.parse::<u64>() else {
        return RangeOutcome::Full;
    };
    if start >= len {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if last.is_empty() {
        len - 1
    } else {
        let Ok(end) = last.parse::<u64>() else {
            return RangeOutcome::Full;
        };
        if end < start {
            // Syntactically invalid per RFC 7233, ignored
            return RangeOutcome::Full;
        }
        end.min(len - 1)
    };

    RangeOutcome::Partial(ByteRange { start, end })
}
