//! Pluggable HTTP exchange backends.
//!
//! An [`Adapter`] performs exactly one blocking HTTP exchange per [`Adapter::send`]
//! and exposes the status code and content type of the response afterwards.
//! The [`crate::Transport`] only talks to this trait, so backends can be swapped
//! without touching request handling.
//!
//! # Feature Flags
//!
//! - `adapter-reqwest` (default) - [`ReqwestAdapter`], built on `reqwest`'s blocking client
//!
//! [`StreamingAdapter`] needs no extra dependency and is always available.
//!
//! # Example
//!
//! ```toml
//! [dependencies]
//! # Streaming adapter only
//! hue-bridge-rs = { version = "0.1", default-features = false }
//! ```

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::errors::Error;

#[cfg(feature = "adapter-reqwest")]
mod reqwest_impl;

mod streaming_impl;

#[cfg(feature = "adapter-reqwest")]
pub use reqwest_impl::ReqwestAdapter;

pub use streaming_impl::StreamingAdapter;

type Result<T> = std::result::Result<T, Error>;

/// HTTP methods understood by the bridge.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

/// A backend able to perform one blocking HTTP exchange at a time.
///
/// Callers drive it as `open` → `send` → (`status_code`, `content_type`) →
/// `close`. One instance must not be shared by overlapping exchanges.
pub trait Adapter {
    /// Acquire or reset the connection context. Called before every exchange.
    fn open(&mut self) -> Result<()>;

    /// Perform one exchange and return the response body.
    ///
    /// Fails with a connection error when the exchange cannot be completed.
    /// A response with a non-2xx status is still a completed exchange.
    fn send(&mut self, address: &str, method: Method, body: Option<&str>) -> Result<String>;

    /// Status code of the last completed exchange.
    fn status_code(&self) -> Option<u16>;

    /// Raw `Content-Type` header of the last completed exchange.
    fn content_type(&self) -> Option<&str>;

    /// Release held resources. Safe to call repeatedly, or without `open`.
    fn close(&mut self);
}

/// Selects which [`Adapter`] a transport is built with.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum AdapterKind {
    #[cfg(feature = "adapter-reqwest")]
    Reqwest,
    Streaming,
}

impl Default for AdapterKind {
    #[cfg(feature = "adapter-reqwest")]
    fn default() -> Self {
        AdapterKind::Reqwest
    }

    #[cfg(not(feature = "adapter-reqwest"))]
    fn default() -> Self {
        AdapterKind::Streaming
    }
}

/// Build a fresh adapter of the given kind.
pub fn default_adapter(kind: AdapterKind) -> Box<dyn Adapter + Send> {
    match kind {
        #[cfg(feature = "adapter-reqwest")]
        AdapterKind::Reqwest => Box::new(ReqwestAdapter::new()),
        AdapterKind::Streaming => Box::new(StreamingAdapter::new()),
    }
}

/// Returns the body only when there is something to put on the wire.
pub(crate) fn non_empty(body: Option<&str>) -> Option<&str> {
    body.filter(|b| !b.is_empty())
}


#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_method_wire_names() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Delete.as_ref(), "DELETE");
        assert_eq!(Method::from_str("put").unwrap(), Method::Put);
        assert!(Method::from_str("PATCH").is_err());
    }

    #[test]
    fn test_non_empty_body() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("{}")), Some("{}"));
    }

    #[test]
    fn test_adapter_kind_names() {
        assert_eq!(AdapterKind::from_str("Streaming").unwrap(), AdapterKind::Streaming);
        assert_eq!(AdapterKind::Streaming.to_string(), "streaming");
        assert!(AdapterKind::from_str("curl").is_err());
    }

    #[test]
    fn test_default_adapter_starts_without_response() {
        let adapter = default_adapter(AdapterKind::Streaming);
        assert_eq!(adapter.status_code(), None);
        assert_eq!(adapter.content_type(), None);
    }
}
