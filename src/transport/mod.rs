//! Network transports: REST request/response and WebSocket connections.
//!
//! Both transports run on the shared tokio runtime and report completions as
//! [`TransportEvent`](crate::domain::events::TransportEvent)s through a std
//! channel, so every render happens on the UI thread.

pub mod rest;
pub mod websocket;
pub mod wire;

pub use rest::{RestClient, SpawningRestTransport};
pub use websocket::WsConnector;

/// Returns the transport module name for smoke checks.
pub fn module_name() -> &'static str {
    "transport"
}
