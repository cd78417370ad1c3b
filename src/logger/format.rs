//! Access log format module
//!
//! One line per request in the Common Log Format shape:
//! `$remote_addr - - [$time_local] "$request" $status $body_bytes_sent`

use chrono::{DateTime, Local};
use std::net::IpAddr;

/// Access log entry containing all request/response information
#[derive(Debug, Clone)]
pub struct AccessLogEntry {
    /// Client IP address
    pub remote_addr: IpAddr,
    /// Request timestamp
    pub time: DateTime<Local>,
    /// HTTP method (GET, HEAD, ...)
    pub method: String,
    /// Request target as sent, including the query string
    pub uri: String,
    /// Protocol string, e.g. `HTTP/1.1`
    pub http_version: String,
    /// Response status code
    pub status: u16,
    /// Response Content-Length, `None` when the response had none
    pub body_bytes: Option<u64>,
}

impl AccessLogEntry {
    /// Create a new access log entry with current timestamp
    pub fn new(remote_addr: IpAddr, method: String, uri: String, http_version: String) -> Self {
        Self {
            remote_addr,
            time: Local::now(),
            method,
            uri,
            http_version,
            status: 200,
            body_bytes: None,
        }
    }

    /// Format as a single log line
    pub fn format(&self) -> String {
        let bytes = self
            .body_bytes
            .map_or_else(|| "-".to_string(), |b| b.to_string());
        format!(
            "{} - - [{}] \"{} {} {}\" {} {}",
            self.remote_addr,
            self.time.format("%d/%b/%Y %H:%M:%S"),
            escape_request(&self.method),
            escape_request(&self.uri),
            self.http_version,
            self.status,
            bytes,
        )
    }
}

/// Replace control characters so a crafted request line cannot forge log lines
fn escape_request(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_control() {
                format!("\\x{:02x}", u32::from(c))
            } else {
                c.to_string()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn create_test_entry() -> AccessLogEntry {
        let mut entry = AccessLogEntry::new(
            "192.168.1.1".parse().unwrap(),
            "GET".to_string(),
            "/pkg/app.wasm?v=2".to_string(),
            "HTTP/1.1".to_string(),
        );
        entry.time = Local.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
        entry.status = 200;
        entry.body_bytes = Some(1234);
        entry
    }

    #[test]
    fn test_format() {
        let log = create_test_entry().format();
        assert_eq!(
            log,
            "192.168.1.1 - - [05/Mar/2024 14:07:09] \"GET /pkg/app.wasm?v=2 HTTP/1.1\" 200 1234"
        );
    }

    #[test]
    fn test_missing_length() {
        let mut entry = create_test_entry();
        entry.status = 304;
        entry.body_bytes = None;
        assert!(entry.format().ends_with("\" 304 -"));
    }

    #[test]
    fn test_control_characters_escaped() {
        let mut entry = create_test_entry();
        entry.uri = "/a\nfake".to_string();
        let log = entry.format();
        assert!(!log.contains('\n'));
        assert!(log.contains("/a\\x0afake"));
    }
}
