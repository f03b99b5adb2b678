//! Inbound payload definitions
//!
//! Connect-time query parameters and the typed probes used to validate
//! event payloads before they are acted on or relayed.

use crate::connection::ConnectionIdentity;
use serde::{Deserialize, Serialize};
use slidesync_core::ConnectMode;

/// Query parameters carried on the upgrade request.
///
/// All fields are optional at the parsing layer so that a missing parameter
/// surfaces as a policy refusal (close frame) rather than an HTTP 400 from
/// the extractor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectParams {
    pub presentation_id: Option<String>,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub mode: Option<String>,
}

impl ConnectParams {
    /// Validate the parameters into a connection identity.
    ///
    /// Presentation id and user id are required (empty counts as missing);
    /// the display name defaults downstream and any unrecognized mode is
    /// treated as editor.
    #[must_use]
    pub fn into_identity(self) -> Option<ConnectionIdentity> {
        let presentation_id = self.presentation_id.filter(|s| !s.is_empty())?;
        let user_id = self.user_id.filter(|s| !s.is_empty())?;

        Some(ConnectionIdentity::new(
            presentation_id,
            user_id,
            self.user_name.filter(|s| !s.is_empty()),
            self.mode.as_deref().map_or(ConnectMode::default(), ConnectMode::parse),
        ))
    }
}

/// Payload probe for `slide-change`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideChangePayload {
    /// The slide the presenter moved to
    pub current_slide_index: u32,
}

/// Payload probe for `update-slide` and `delete-slide`.
///
/// Only the slide index is validated; the rest of the payload passes through
/// verbatim to the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideIndexPayload {
    pub slide_index: u32,
}
