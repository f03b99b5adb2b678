//! Outbound event payloads and message envelope

use super::ServerEventType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use slidesync_core::Viewer;

/// A message sent to clients: `{"event": "...", "data": {...}}`.
///
/// Cloneable so a single message can fan out to every connection in a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerMessage {
    /// Event name
    pub event: ServerEventType,

    /// Event payload
    pub data: Value,
}

impl ServerMessage {
    /// Create a message with an already-serialized payload (used when
    /// forwarding a client payload verbatim)
    #[must_use]
    pub fn new(event: ServerEventType, data: Value) -> Self {
        Self { event, data }
    }

    /// Create a `viewers-updated` presence snapshot
    #[must_use]
    pub fn viewers_updated(viewers: &[Viewer]) -> Self {
        let payload = ViewersUpdatedEvent {
            viewers: viewers.iter().map(ViewerPayload::from).collect(),
        };
        Self::new(
            ServerEventType::ViewersUpdated,
            serde_json::to_value(payload).unwrap_or_default(),
        )
    }

    /// Create a `slide-changed` position update
    #[must_use]
    pub fn slide_changed(current_slide_index: u32) -> Self {
        let payload = SlideChangedEvent {
            current_slide_index,
        };
        Self::new(
            ServerEventType::SlideChanged,
            serde_json::to_value(payload).unwrap_or_default(),
        )
    }

    /// Serialize to JSON text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl std::fmt::Display for ServerMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ServerMessage(event={})", self.event)
    }
}

/// `viewers-updated` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewersUpdatedEvent {
    pub viewers: Vec<ViewerPayload>,
}

/// Viewer entry as exposed on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerPayload {
    pub user_id: String,
    pub name: String,
}

impl From<&Viewer> for ViewerPayload {
    fn from(viewer: &Viewer) -> Self {
        Self {
            user_id: viewer.user_id.clone(),
            name: viewer.display_name.clone(),
        }
    }
}

/// `slide-changed` payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideChangedEvent {
    pub current_slide_index: u32,
}
