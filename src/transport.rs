//! HTTP/JSON transport to a bridge.

use std::fmt;

use log::{debug, warn};
use serde_json::Value;

use crate::adapter::{Adapter, AdapterKind, Method, default_adapter};
use crate::errors::{ConnectionError, Error};
use crate::history::{MessageHistory, MessageType};
use crate::response::BridgeResponse;

type Result<T> = std::result::Result<T, Error>;

/// Sends requests to one bridge and decodes its answers.
///
/// Each call performs exactly one exchange through the owned [`Adapter`]:
/// there is no retry, and every failure reaches the caller unchanged.
/// Calls take `&mut self`; share a transport between threads behind a mutex,
/// or give each session its own.
///
/// # Example
///
/// ```no_run
/// use hue_bridge_rs::{Method, Transport};
/// use serde_json::json;
///
/// let mut transport = Transport::new("192.168.1.2");
/// let result = transport.send_request(
///     "/api/someuser/lights/1/state",
///     Method::Put,
///     Some(&json!({"on": true})),
/// )?;
/// println!("{result}");
/// # Ok::<(), hue_bridge_rs::Error>(())
/// ```
pub struct Transport {
    host: String,
    adapter: Box<dyn Adapter + Send>,
    history: MessageHistory,
}

impl fmt::Debug for Transport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transport")
            .field("host", &self.host)
            .field("history", &self.history.summary())
            .finish_non_exhaustive()
    }
}

impl Transport {
    const JSON_CONTENT_TYPE: &'static str = "application/json";

    /// Create a transport using the default adapter for the enabled features.
    pub fn new(host: &str) -> Self {
        Self::with_adapter(host, default_adapter(AdapterKind::default()))
    }

    pub fn with_adapter(host: &str, adapter: Box<dyn Adapter + Send>) -> Self {
        Transport {
            host: host.to_string(),
            adapter,
            history: MessageHistory::new(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: &str) {
        self.host = host.to_string();
    }

    /// Replace the adapter, closing the previous one.
    pub fn set_adapter(&mut self, adapter: Box<dyn Adapter + Send>) {
        self.adapter.close();
        self.adapter = adapter;
    }

    pub fn history(&self) -> &MessageHistory {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Send a request and unwrap the bridge's response envelope.
    ///
    /// A one-element array is reduced to its element. An `error` envelope
    /// becomes [`Error::Bridge`], a `success` envelope yields its contents, and
    /// anything else is returned as decoded.
    pub fn send_request(
        &mut self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value> {
        let value = self.get_json_response(path, method, body)?;

        match BridgeResponse::classify(value) {
            BridgeResponse::Error(err) => {
                warn!("{} {} rejected by bridge: {}", method, path, err);
                self.history.record_error(&err.to_string());
                Err(Error::Bridge(err))
            }
            BridgeResponse::Success(value) | BridgeResponse::Payload(value) => Ok(value),
        }
    }

    /// Send a request and return the decoded JSON as is, envelope included.
    ///
    /// For endpoints whose answers do not follow the error/success convention,
    /// such as bulk listings.
    pub fn send_request_bypass_body_validation(
        &mut self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value> {
        self.get_json_response(path, method, body)
    }

    fn get_json_response(
        &mut self,
        path: &str,
        method: Method,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("http://{}{}", self.host, path);
        let body = body.filter(|b| !b.is_null());
        let encoded = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(Error::JsonDump)?;

        debug!("{} {}", method, url);
        self.history.record(
            MessageType::Send,
            method,
            path,
            body.unwrap_or(&Value::Null),
        );

        let result = self.exchange(&url, method, encoded.as_deref());
        self.adapter.close();

        match result {
            Ok(value) => {
                debug!("{} {} -> {}", method, path, value);
                self.history
                    .record(MessageType::Receive, method, path, &value);
                Ok(value)
            }
            Err(e) => {
                warn!("{} {} failed: {}", method, path, e);
                self.history.record_error(&e.to_string());
                Err(e)
            }
        }
    }

    fn exchange(&mut self, url: &str, method: Method, body: Option<&str>) -> Result<Value> {
        self.adapter.open()?;
        let text = self.adapter.send(url, method, body)?;

        let status = self.adapter.status_code();
        if status != Some(200) {
            return Err(ConnectionError::Status(status).into());
        }

        let content_type = self.adapter.content_type();
        let media_type = content_type.and_then(|ct| ct.split(';').next());
        if media_type != Some(Self::JSON_CONTENT_TYPE) {
            return Err(ConnectionError::ContentType(content_type.map(String::from)).into());
        }

        serde_json::from_str(&text).map_err(|e| ConnectionError::JsonLoad(e).into())
    }
}
