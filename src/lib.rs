//! # hue_bridge_rs
//!
//! A blocking Rust client core for the Philips Hue bridge REST API.
//!
//! The crate handles the plumbing every bridge call needs: sending a request
//! through a pluggable HTTP [`Adapter`], validating the HTTP layer, decoding
//! JSON, and unwrapping the bridge's `error`/`success` envelopes into typed
//! results. It also converts between display RGB and the bridge's xy color
//! space.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hue_bridge_rs::{Color, Method, Transport};
//! use serde_json::json;
//!
//! let mut transport = Transport::new("192.168.1.2");
//!
//! let xy = Color::rgb(255, 0, 0).to_xy();
//! let body = json!({"on": true, "xy": [xy.x(), xy.y()], "bri": xy.brightness()});
//! transport.send_request("/api/abc123/lights/1/state", Method::Put, Some(&body))?;
//! # Ok::<(), hue_bridge_rs::Error>(())
//! ```
//!
//! ## Errors
//!
//! Failures are split in two: [`ConnectionError`] covers anything wrong at
//! the HTTP or JSON level, [`BridgeError`] carries an error object the bridge
//! itself returned, classified by [`BridgeErrorKind`].
//!
//! ## Adapters
//!
//! - [`ReqwestAdapter`] (feature `adapter-reqwest`, on by default): general
//!   purpose client built on `reqwest::blocking`
//! - [`StreamingAdapter`]: plain `TcpStream` exchange, no extra dependencies
//!
//! ## Feature Flags
//!
//! - `adapter-reqwest` (default): enable [`ReqwestAdapter`]

pub mod adapter;
mod client;
mod config;
pub mod conversion;
mod error_kind;
mod errors;
mod history;
mod response;
mod transport;
mod types;

// Re-export public API
#[cfg(feature = "adapter-reqwest")]
pub use adapter::ReqwestAdapter;
pub use adapter::{Adapter, AdapterKind, Method, StreamingAdapter, default_adapter};
pub use client::{Client, Command};
pub use config::BridgeConfig;
pub use conversion::{rgb_to_xy, xy_to_rgb};
pub use error_kind::BridgeErrorKind;
pub use errors::{BridgeError, ConnectionError, Error};
pub use history::{HistoryEntry, HistorySummary, MessageHistory, MessageType};
pub use transport::Transport;
pub use types::{Color, ColorXy, UnclampedRgb};
