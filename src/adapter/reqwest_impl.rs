//! reqwest blocking client implementation.

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;

use super::{Adapter, Method, non_empty};
use crate::errors::{ConnectionError, Error};

type Result<T> = std::result::Result<T, Error>;

/// Adapter backed by `reqwest::blocking::Client`.
///
/// The client is created on the first `open` and reused afterwards; `close`
/// drops it together with any pooled connections.
#[derive(Debug, Default)]
pub struct ReqwestAdapter {
    client: Option<Client>,
    status: Option<u16>,
    content_type: Option<String>,
}

impl ReqwestAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn client(&mut self) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = Client::builder().build().map_err(ConnectionError::Http)?;
        self.client = Some(client.clone());
        Ok(client)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl Adapter for ReqwestAdapter {
    fn open(&mut self) -> Result<()> {
        self.status = None;
        self.content_type = None;
        self.client()?;
        Ok(())
    }

    fn send(&mut self, address: &str, method: Method, body: Option<&str>) -> Result<String> {
        let client = self.client()?;

        let mut request = client.request(method.into(), address);
        if let Some(body) = non_empty(body) {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_owned());
        }

        let response = request.send().map_err(ConnectionError::Http)?;
        self.status = Some(response.status().as_u16());
        self.content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        debug!("{} {} -> {:?}", method, address, self.status);

        response
            .text()
            .map_err(|e| ConnectionError::Http(e).into())
    }

    fn status_code(&self) -> Option<u16> {
        self.status
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    fn close(&mut self) {
        self.client = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::test_server::{http_response, serve_once};

    #[test]
    fn test_send_reads_status_and_content_type() {
        let (base, server) = serve_once(http_response(
            "200 OK",
            "application/json; charset=utf-8",
            r#"{"name":"Kitchen"}"#,
        ));

        let mut adapter = ReqwestAdapter::new();
        adapter.open().unwrap();
        let body = adapter
            .send(&format!("{base}/api/none/config"), Method::Get, None)
            .unwrap();

        assert_eq!(body, r#"{"name":"Kitchen"}"#);
        assert_eq!(adapter.status_code(), Some(200));
        assert_eq!(
            adapter.content_type(),
            Some("application/json; charset=utf-8")
        );

        let request = server.join().unwrap();
        assert!(request.starts_with("GET /api/none/config HTTP/1.1\r\n"));
        adapter.close();
        adapter.close();
    }

    #[test]
    fn test_send_puts_body_on_the_wire() {
        let (base, server) = serve_once(http_response("200 OK", "application/json", "[]"));

        let mut adapter = ReqwestAdapter::new();
        adapter.open().unwrap();
        adapter
            .send(&format!("{base}/api/user/lights/1/state"), Method::Put, Some(r#"{"on":true}"#))
            .unwrap();

        let request = server.join().unwrap();
        assert!(request.starts_with("PUT /api/user/lights/1/state HTTP/1.1\r\n"));
        assert!(request.ends_with(r#"{"on":true}"#));
    }

    #[test]
    fn test_non_success_status_is_still_a_response() {
        let (base, server) = serve_once(http_response("404 Not Found", "text/html", "missing"));

        let mut adapter = ReqwestAdapter::new();
        adapter.open().unwrap();
        let body = adapter.send(&format!("{base}/nope"), Method::Get, None).unwrap();

        assert_eq!(body, "missing");
        assert_eq!(adapter.status_code(), Some(404));
        assert_eq!(adapter.content_type(), Some("text/html"));
        server.join().unwrap();
    }

    #[test]
    fn test_connection_refused_is_a_connection_failure() {
        let addr = crate::adapter::test_server::unused_address();

        let mut adapter = ReqwestAdapter::new();
        adapter.open().unwrap();
        let err = adapter
            .send(&format!("http://{addr}/api"), Method::Get, None)
            .unwrap_err();

        assert!(err.is_connection_failure());
        assert_eq!(adapter.status_code(), None);
    }
}
