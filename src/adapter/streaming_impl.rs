//! Minimal std-only HTTP/1.0 implementation.

use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::{Adapter, Method, non_empty};
use crate::errors::{ConnectionError, Error};

type Result<T> = std::result::Result<T, Error>;

static STATUS_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^HTTP/\d\.\d (\d{3})").unwrap());

static CONTENT_TYPE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mi)^Content-Type:[ \t]*([^\r\n]*)").unwrap());

/// Adapter speaking plain HTTP/1.0 over a `TcpStream`.
///
/// Every response is read to EOF whatever its status, so error pages come back
/// as bodies. Status and content type are matched out of the raw header text
/// afterwards. Requests are HTTP/1.0, so the bridge never answers with a
/// chunked body.
#[derive(Debug, Default)]
pub struct StreamingAdapter {
    headers: Option<String>,
}

impl StreamingAdapter {
    const DEFAULT_PORT: u16 = 80;

    pub fn new() -> Self {
        Self::default()
    }

    /// Raw header block of the last response, lines joined by CRLF.
    pub fn headers(&self) -> Option<&str> {
        self.headers.as_deref()
    }
}

impl Adapter for StreamingAdapter {
    fn open(&mut self) -> Result<()> {
        self.headers = None;
        Ok(())
    }

    fn send(&mut self, address: &str, method: Method, body: Option<&str>) -> Result<String> {
        self.headers = None;

        let (authority, path) = split_address(address)?;
        let target = if has_port(authority) {
            authority.to_string()
        } else {
            format!("{}:{}", authority, Self::DEFAULT_PORT)
        };

        let mut stream =
            TcpStream::connect(&target).map_err(|e| ConnectionError::socket("connect", e))?;

        let request = build_request(authority, path, method, non_empty(body));
        stream
            .write_all(request.as_bytes())
            .map_err(|e| ConnectionError::socket("write", e))?;

        let mut raw = Vec::new();
        stream
            .read_to_end(&mut raw)
            .map_err(|e| ConnectionError::socket("read", e))?;
        let raw = String::from_utf8(raw).map_err(ConnectionError::Utf8Decode)?;

        let (headers, body) = match raw.split_once("\r\n\r\n") {
            Some((headers, body)) => (headers.to_string(), body.to_string()),
            None => (raw, String::new()),
        };
        debug!("{} {} -> {:?}", method, address, parse_status(&headers));

        self.headers = Some(headers);
        Ok(body)
    }

    fn status_code(&self) -> Option<u16> {
        self.headers.as_deref().and_then(parse_status)
    }

    fn content_type(&self) -> Option<&str> {
        self.headers.as_deref().and_then(parse_content_type)
    }

    fn close(&mut self) {
        self.headers = None;
    }
}

/// Split `http://authority/path` into its authority and path.
fn split_address(address: &str) -> Result<(&str, &str)> {
    let invalid = || ConnectionError::InvalidAddress(address.to_string());

    let rest = address.strip_prefix("http://").ok_or_else(invalid)?;
    let (authority, path) = match rest.find('/') {
        Some(i) => (&rest[..i], &rest[i..]),
        None => (rest, "/"),
    };
    if authority.is_empty() {
        return Err(invalid().into());
    }
    Ok((authority, path))
}

/// Whether `authority` carries an explicit port. Bracketed IPv6 literals only
/// have one after the closing `]`.
fn has_port(authority: &str) -> bool {
    match authority.rsplit_once(']') {
        Some((_, rest)) => rest.starts_with(':'),
        None => authority.contains(':'),
    }
}

fn build_request(authority: &str, path: &str, method: Method, body: Option<&str>) -> String {
    let mut request = format!("{method} {path} HTTP/1.0\r\nHost: {authority}\r\nConnection: close\r\n");
    match body {
        Some(body) => {
            request.push_str("Content-Type: application/json\r\n");
            request.push_str(&format!("Content-Length: {}\r\n\r\n", body.len()));
            request.push_str(body);
        }
        None => request.push_str("\r\n"),
    }
    request
}

fn parse_status(headers: &str) -> Option<u16> {
    STATUS_LINE
        .captures(headers)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

fn parse_content_type(headers: &str) -> Option<&str> {
    CONTENT_TYPE_HEADER
        .captures(headers)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::test_server::{http_response, serve_once, unused_address};

    #[test]
    fn test_parse_headers() {
        let headers = "HTTP/1.1 200 OK\r\nServer: nginx\r\ncontent-type: application/json\r\nConnection: close";
        assert_eq!(parse_status(headers), Some(200));
        assert_eq!(parse_content_type(headers), Some("application/json"));
    }

    #[test]
    fn test_parse_headers_keeps_parameters() {
        let headers = "HTTP/1.0 403 Forbidden\r\nContent-Type: text/html; charset=iso-8859-1";
        assert_eq!(parse_status(headers), Some(403));
        assert_eq!(parse_content_type(headers), Some("text/html; charset=iso-8859-1"));
    }

    #[test]
    fn test_parse_headers_missing() {
        assert_eq!(parse_status("garbage"), None);
        assert_eq!(parse_content_type("HTTP/1.1 204 No Content"), None);
    }

    #[test]
    fn test_split_address() {
        assert_eq!(
            split_address("http://10.0.0.2/api/none").unwrap(),
            ("10.0.0.2", "/api/none")
        );
        assert_eq!(
            split_address("http://bridge.local:8080").unwrap(),
            ("bridge.local:8080", "/")
        );
        assert!(split_address("https://10.0.0.2/api").is_err());
        assert!(split_address("http:///api").is_err());
    }

    #[test]
    fn test_has_port() {
        assert!(!has_port("10.0.0.2"));
        assert!(has_port("bridge.local:8080"));
        assert!(!has_port("[::1]"));
        assert!(has_port("[::1]:8080"));
        assert!(!has_port("[fe80::1%eth0]"));
    }

    #[test]
    fn test_send_to_bracketed_ipv6_without_port() {
        let mut adapter = StreamingAdapter::new();

        // Whether port 80 answers depends on the host; the address itself must be accepted.
        if let Err(err) = adapter.send("http://[::1]/api", Method::Get, None) {
            assert!(
                !err.to_string().contains("invalid port value"),
                "unexpected error: {err}"
            );
        }
    }

    #[test]
    fn test_build_request_with_body() {
        let request = build_request("10.0.0.2", "/api/u/lights/1/state", Method::Put, Some("{}"));
        assert_eq!(
            request,
            "PUT /api/u/lights/1/state HTTP/1.0\r\nHost: 10.0.0.2\r\nConnection: close\r\n\
             Content-Type: application/json\r\nContent-Length: 2\r\n\r\n{}"
        );
    }

    #[test]
    fn test_send_round_trip() {
        let (base, server) = serve_once(http_response(
            "200 OK",
            "application/json",
            r#"[{"success":{"username":"abc"}}]"#,
        ));

        let mut adapter = StreamingAdapter::new();
        adapter.open().unwrap();
        let body = adapter
            .send(&format!("{base}/api"), Method::Post, Some(r#"{"devicetype":"demo"}"#))
            .unwrap();

        assert_eq!(body, r#"[{"success":{"username":"abc"}}]"#);
        assert_eq!(adapter.status_code(), Some(200));
        assert_eq!(adapter.content_type(), Some("application/json"));

        let request = server.join().unwrap();
        assert!(request.starts_with("POST /api HTTP/1.0\r\n"));
        assert!(request.ends_with(r#"{"devicetype":"demo"}"#));

        adapter.close();
        assert_eq!(adapter.status_code(), None);
    }

    #[test]
    fn test_error_status_body_is_readable() {
        let (base, server) = serve_once(http_response("404 Not Found", "text/plain", "not here"));

        let mut adapter = StreamingAdapter::new();
        adapter.open().unwrap();
        let body = adapter.send(&format!("{base}/missing"), Method::Get, None).unwrap();

        assert_eq!(body, "not here");
        assert_eq!(adapter.status_code(), Some(404));
        assert_eq!(adapter.content_type(), Some("text/plain"));
        server.join().unwrap();
    }

    #[test]
    fn test_connection_refused() {
        let mut adapter = StreamingAdapter::new();
        let err = adapter
            .send(&format!("http://{}/api", unused_address()), Method::Get, None)
            .unwrap_err();
        assert!(err.is_connection_failure());
    }

    #[test]
    fn test_close_without_open() {
        let mut adapter = StreamingAdapter::new();
        adapter.close();
        adapter.close();
        assert!(adapter.headers().is_none());
    }
}
