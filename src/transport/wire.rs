//! JSON framing shared by both transports.
//!
//! Outbound payloads are always `{"message": "<text>"}`. Inbound socket frames
//! are opaque text and never pass through here.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct OutboundMessage<'a> {
    pub message: &'a str,
}

/// Encodes the socket frame for an outgoing chat message.
pub fn outbound_frame(text: &str) -> String {
    serde_json::json!({ "message": text }).to_string()
}

/// Picks the text to display from a REST response body.
///
/// A string `reply` is shown as-is, any other non-null `reply` is shown
/// serialized, and a body without one is shown as compact JSON.
pub fn reply_text(body: &Value) -> String {
    match body.get("reply") {
        Some(Value::String(reply)) => reply.clone(),
        Some(reply) if !reply.is_null() => reply.to_string(),
        _ => body.to_string(),
    }
}
