//! Inbound message envelope
//!
//! All client messages follow the `{"event": "...", "data": {...}}` shape.
//! The envelope is parsed first; each handler then validates the payload it
//! needs, so an unknown event or a bad payload only costs that one message.

use super::ClientEventType;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A parsed client message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientMessage {
    /// Event name
    pub event: ClientEventType,

    /// Event payload, forwarded verbatim for relay events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ClientMessage {
    /// Deserialize from JSON text
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to JSON text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Try to parse the payload as a typed structure.
    ///
    /// Returns `None` when the payload is absent or does not match — the
    /// caller decides whether that drops the message.
    pub fn payload<T: DeserializeOwned>(&self) -> Option<T> {
        self.data
            .as_ref()
            .and_then(|d| serde_json::from_value(d.clone()).ok())
    }

    /// The raw payload, if present and not JSON null
    #[must_use]
    pub fn raw_payload(&self) -> Option<&Value> {
        match &self.data {
            Some(Value::Null) | None => None,
            Some(value) => Some(value),
        }
    }
}

impl std::fmt::Display for ClientMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClientMessage(event={})", self.event)
    }
}
