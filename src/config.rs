//! Bridge connection settings.

use serde::{Deserialize, Serialize};

use crate::adapter::AdapterKind;

/// Where a bridge lives and how to talk to it.
///
/// Deserializable from any serde format:
///
/// ```
/// use hue_bridge_rs::{AdapterKind, BridgeConfig};
///
/// let config: BridgeConfig = serde_json::from_str(r#"{"host": "192.168.1.2"}"#).unwrap();
/// assert_eq!(config.host, "192.168.1.2");
/// assert_eq!(config.username, None);
/// assert_eq!(config.adapter, AdapterKind::default());
/// ```
#[serde_with::skip_serializing_none]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Host name or IP address, optionally with `:port`.
    pub host: String,
    /// Whitelisted username; `None` until paired.
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub adapter: AdapterKind,
}

impl BridgeConfig {
    /// Credential segment used by unauthenticated calls.
    pub const ANONYMOUS_USERNAME: &'static str = "none";

    pub fn new(host: &str) -> Self {
        BridgeConfig {
            host: host.to_string(),
            username: None,
            adapter: AdapterKind::default(),
        }
    }

    pub fn with_username(mut self, username: &str) -> Self {
        self.username = Some(username.to_string());
        self
    }

    pub fn with_adapter(mut self, adapter: AdapterKind) -> Self {
        self.adapter = adapter;
        self
    }

    /// Build an API path under this config's credential.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::BridgeConfig;
    ///
    /// let config = BridgeConfig::new("10.0.0.2");
    /// assert_eq!(config.api_path("/config"), "/api/none/config");
    ///
    /// let config = config.with_username("abc123");
    /// assert_eq!(config.api_path("/lights/1"), "/api/abc123/lights/1");
    /// assert_eq!(config.api_path(""), "/api/abc123");
    /// ```
    pub fn api_path(&self, resource: &str) -> String {
        api_path(self.username.as_deref(), resource)
    }
}

pub(crate) fn api_path(username: Option<&str>, resource: &str) -> String {
    format!(
        "/api/{}{}",
        username.unwrap_or(BridgeConfig::ANONYMOUS_USERNAME),
        resource
    )
}
