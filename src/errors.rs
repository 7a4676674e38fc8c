use std::string::FromUtf8Error;

use crate::error_kind::BridgeErrorKind;

/// All error types that can occur when talking to a bridge.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The exchange itself failed: unreachable host, non-200 status,
    /// non-JSON content type or an undecodable body.
    #[error("connection failure: {0}")]
    Connection(#[from] ConnectionError),

    /// The bridge answered with an error envelope.
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    /// Failed to serialize a request body to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// Failed to parse a [`crate::Color`] from a string.
    #[error("invalid color string: {0}")]
    InvalidColorString(String),
}

impl Error {
    /// True for every failure of the exchange itself, as opposed to a
    /// rejection reported by the bridge.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// The classified bridge error kind, if the bridge rejected the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::{BridgeError, BridgeErrorKind, Error};
    ///
    /// let err = Error::from(BridgeError::new(101, "link button not pressed"));
    /// assert_eq!(err.bridge_kind(), Some(BridgeErrorKind::LinkButton));
    /// assert!(!err.is_connection_failure());
    /// ```
    pub fn bridge_kind(&self) -> Option<BridgeErrorKind> {
        match self {
            Error::Bridge(err) => Some(err.kind()),
            _ => None,
        }
    }
}

/// Reasons an exchange with the bridge could not be completed.
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    /// A socket operation failed in the streaming adapter.
    #[error("socket {action} error: {err:?}")]
    Socket { action: String, err: std::io::Error },

    /// The blocking HTTP client failed to complete the request.
    #[cfg(feature = "adapter-reqwest")]
    #[error("http client error: {0}")]
    Http(#[source] reqwest::Error),

    /// The response status was not 200, or could not be read at all.
    #[error("{}", status_message(.0))]
    Status(Option<u16>),

    /// The response was not declared as `application/json`.
    #[error("{}", content_type_message(.0))]
    ContentType(Option<String>),

    /// The response body was not valid JSON.
    #[error("failed to load json: {0:?}")]
    JsonLoad(serde_json::Error),

    /// The raw response contained invalid UTF-8.
    #[error("utf8 decoding error: {0:?}")]
    Utf8Decode(FromUtf8Error),

    /// The adapter cannot address the given URL.
    #[error("unsupported address {0}")]
    InvalidAddress(String),
}

impl ConnectionError {
    /// Create a new socket error
    pub fn socket(action: &str, err: std::io::Error) -> Self {
        ConnectionError::Socket {
            action: action.to_string(),
            err,
        }
    }
}

fn status_message(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("unexpected status code {code}"),
        None => "no status line in response".to_string(),
    }
}

fn content_type_message(content_type: &Option<String>) -> String {
    match content_type {
        Some(content_type) => format!("unexpected content type {content_type}"),
        None => "missing content type".to_string(),
    }
}

/// An error reported by the bridge in an `{"error": {...}}` envelope.
///
/// The numeric code and description are kept verbatim; `kind` is derived from
/// the code and falls back to [`BridgeErrorKind::Bridge`] for unknown codes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind} (type {code}): {description}")]
pub struct BridgeError {
    kind: BridgeErrorKind,
    code: i64,
    description: String,
    address: Option<String>,
}

impl BridgeError {
    pub fn new(code: i64, description: &str) -> Self {
        let kind = u32::try_from(code)
            .map(BridgeErrorKind::from_code)
            .unwrap_or(BridgeErrorKind::Bridge);
        BridgeError {
            kind,
            code,
            description: description.to_string(),
            address: None,
        }
    }

    /// Attach the resource address the bridge blamed for the error.
    pub fn with_address(mut self, address: &str) -> Self {
        self.address = Some(address.to_string());
        self
    }

    pub fn kind(&self) -> BridgeErrorKind {
        self.kind
    }

    /// The code exactly as the bridge sent it, even when unclassified.
    pub fn code(&self) -> i64 {
        self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
