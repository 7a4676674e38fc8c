//! Bridge client and the command seam.

use crate::adapter::default_adapter;
use crate::config::{self, BridgeConfig};
use crate::errors::Error;
use crate::transport::Transport;

type Result<T> = std::result::Result<T, Error>;

/// A request against the bridge API.
///
/// Implementors decide the path, method and body and interpret the decoded
/// result; the client only supplies the credential and the transport.
///
/// # Example
///
/// ```no_run
/// use hue_bridge_rs::{Client, Command, Error, Method};
/// use serde_json::Value;
///
/// struct GetLights;
///
/// impl Command for GetLights {
///     type Output = Value;
///
///     fn send(&self, client: &mut Client) -> Result<Value, Error> {
///         let path = client.api_path("/lights");
///         client
///             .transport_mut()
///             .send_request_bypass_body_validation(&path, Method::Get, None)
///     }
/// }
///
/// let mut client = Client::new("192.168.1.2");
/// client.set_username("abc123");
/// let lights = client.send_command(&GetLights)?;
/// println!("{lights}");
/// # Ok::<(), hue_bridge_rs::Error>(())
/// ```
pub trait Command {
    type Output;

    fn send(&self, client: &mut Client) -> Result<Self::Output>;
}

/// Entry point for talking to one bridge.
#[derive(Debug)]
pub struct Client {
    username: Option<String>,
    transport: Transport,
}

impl Client {
    pub fn new(host: &str) -> Self {
        Self::from_config(&BridgeConfig::new(host))
    }

    pub fn from_config(config: &BridgeConfig) -> Self {
        Client {
            username: config.username.clone(),
            transport: Transport::with_adapter(&config.host, default_adapter(config.adapter)),
        }
    }

    pub fn with_transport(transport: Transport) -> Self {
        Client {
            username: None,
            transport,
        }
    }

    pub fn host(&self) -> &str {
        self.transport.host()
    }

    pub fn set_host(&mut self, host: &str) {
        self.transport.set_host(host);
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn set_username(&mut self, username: &str) {
        self.username = Some(username.to_string());
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    /// API path for `resource` under the current credential, or `none`.
    pub fn api_path(&self, resource: &str) -> String {
        config::api_path(self.username.as_deref(), resource)
    }

    pub fn send_command<C: Command>(&mut self, command: &C) -> Result<C::Output> {
        command.send(self)
    }
}
