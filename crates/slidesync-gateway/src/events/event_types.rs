//! Outbound event names
//!
//! These are the event names clients subscribe to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Events the gateway sends to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServerEventType {
    /// The room's viewer list changed
    ViewersUpdated,
    /// The presenter moved to another slide (also the join snapshot)
    SlideChanged,
    /// A peer edited a slide
    SlideUpdated,
    /// A peer edited the presentation title/description
    PresentationUpdated,
    /// A peer added a slide
    SlideAdded,
    /// A peer deleted a slide
    SlideDeleted,
}

impl ServerEventType {
    /// Get the wire name of this event
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewersUpdated => "viewers-updated",
            Self::SlideChanged => "slide-changed",
            Self::SlideUpdated => "slide-updated",
            Self::PresentationUpdated => "presentation-updated",
            Self::SlideAdded => "slide-added",
            Self::SlideDeleted => "slide-deleted",
        }
    }
}

impl fmt::Display for ServerEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
