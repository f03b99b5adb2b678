//! Connect modes
//!
//! The mode a client declares when attaching to a presentation. Only viewer
//! mode participates in presence tracking; presenters and editors join the
//! broadcast group without appearing in the viewer list.

use serde::{Deserialize, Serialize};

/// Role a connection declares at attach time. Immutable for the lifetime of
/// the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectMode {
    /// Drives the slide position for the room
    Presenter,
    /// Read-only attendee, tracked in the room's viewer list
    Viewer,
    /// Collaborator editing over the store API; broadcast group only
    #[default]
    Editor,
}

impl ConnectMode {
    /// Parse a mode string, treating anything unrecognized as editor.
    ///
    /// Mirrors the join contract: only an explicit `viewer` opts into
    /// presence tracking, an explicit `presenter` labels the slide driver,
    /// everything else gets the default broadcast-only behavior.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "presenter" => Self::Presenter,
            "viewer" => Self::Viewer,
            _ => Self::Editor,
        }
    }

    /// Whether this connection appears in the room's viewer list
    #[must_use]
    pub const fn is_viewer(self) -> bool {
        matches!(self, Self::Viewer)
    }

    /// Get the wire name of this mode
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Presenter => "presenter",
            Self::Viewer => "viewer",
            Self::Editor => "editor",
        }
    }
}

impl std::fmt::Display for ConnectMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
