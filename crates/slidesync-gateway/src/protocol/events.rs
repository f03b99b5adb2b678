//! Client event names
//!
//! Every inbound event a client may send over the socket. Unknown names fail
//! envelope parsing and the message is dropped.

use crate::events::ServerEventType;
use serde::{Deserialize, Serialize};

/// Events a client may send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientEventType {
    /// Presenter moved to another slide; the one event the room tracks
    SlideChange,
    /// Slide content changed locally; relay only
    UpdateSlide,
    /// Presentation title/description changed locally; relay only
    UpdatePresentation,
    /// Slide added locally; relay only
    AddSlide,
    /// Slide deleted locally; relay only
    DeleteSlide,
}

impl ClientEventType {
    /// Get the wire name of this event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SlideChange => "slide-change",
            Self::UpdateSlide => "update-slide",
            Self::UpdatePresentation => "update-presentation",
            Self::AddSlide => "add-slide",
            Self::DeleteSlide => "delete-slide",
        }
    }

    /// The event name peers receive when this event is rebroadcast
    #[must_use]
    pub const fn forwards_as(self) -> ServerEventType {
        match self {
            Self::SlideChange => ServerEventType::SlideChanged,
            Self::UpdateSlide => ServerEventType::SlideUpdated,
            Self::UpdatePresentation => ServerEventType::PresentationUpdated,
            Self::AddSlide => ServerEventType::SlideAdded,
            Self::DeleteSlide => ServerEventType::SlideDeleted,
        }
    }
}

impl std::fmt::Display for ClientEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
