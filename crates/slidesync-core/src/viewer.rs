//! Viewer presence entries

use crate::ids::ConnectionId;
use serde::{Deserialize, Serialize};

/// Fallback display name when the client supplies none
pub const ANONYMOUS_NAME: &str = "Anonymous";

/// A presence entry in a room's viewer list.
///
/// The user id and display name are externally supplied and not verified;
/// the connection id ties the entry back to the socket that created it.
/// The same user id may appear more than once when a user attaches from
/// multiple tabs without disconnecting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    /// Connection that produced this entry
    pub connection_id: ConnectionId,
    /// Externally supplied user id (trusted, not verified)
    pub user_id: String,
    /// Display name shown in the audience list
    pub display_name: String,
}

impl Viewer {
    /// Create a viewer entry, defaulting the display name when absent
    #[must_use]
    pub fn new(
        connection_id: ConnectionId,
        user_id: impl Into<String>,
        display_name: Option<String>,
    ) -> Self {
        Self {
            connection_id,
            user_id: user_id.into(),
            display_name: display_name.unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
        }
    }
}
