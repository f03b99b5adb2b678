//! Presence tracker
//!
//! Fires on viewer connect and on disconnect. Only viewer-mode connections
//! appear in the audience list; presenters and editors pass through the
//! broadcast group without presence entries. This asymmetry is deliberate:
//! the presence UI shows the audience, not the collaborators.

use super::{HandlerError, HandlerResult};
use crate::connection::Connection;
use crate::events::ServerMessage;
use crate::server::GatewayState;
use slidesync_core::Viewer;
use std::sync::Arc;

/// Tracks viewer presence per room
pub struct PresenceTracker;

impl PresenceTracker {
    /// Handle a viewer-mode connection joining its room.
    ///
    /// Appends the viewer (creating the room at slide 0 if needed),
    /// broadcasts the new audience list to the whole room — joiner included
    /// — and then sends the joiner a private position snapshot so a late
    /// join is not stuck at slide 0 when the presenter has advanced.
    pub async fn handle_join(
        state: &GatewayState,
        connection: &Arc<Connection>,
    ) -> HandlerResult<()> {
        debug_assert!(connection.is_viewer());

        let presentation_id = connection.presentation_id();
        let viewer = Viewer::new(
            connection.id(),
            connection.user_id(),
            Some(connection.display_name().to_string()),
        );

        let (viewers, current_slide) = {
            let mut registry = state.registry().write();
            let viewers = registry.add_viewer(presentation_id, viewer);
            let current_slide = registry.current_slide(presentation_id).unwrap_or(0);
            (viewers, current_slide)
        };

        tracing::info!(
            connection_id = %connection.id(),
            presentation_id = %presentation_id,
            user_id = %connection.user_id(),
            viewers = viewers.len(),
            "Viewer joined"
        );

        state
            .connections()
            .broadcast_to_room(presentation_id, ServerMessage::viewers_updated(&viewers))
            .await;

        connection
            .send(ServerMessage::slide_changed(current_slide))
            .await
            .map_err(|e| HandlerError::Internal(format!("Failed to send join snapshot: {e}")))?;

        Ok(())
    }

    /// Handle a disconnect.
    ///
    /// Non-viewer connections only leave the broadcast group, which the
    /// connection manager already handled. For viewers, every entry with
    /// the same user id is removed, the shrunken audience list is broadcast
    /// to the remaining room, and the registry drops the room when the list
    /// empties. Idempotent: an absent viewer or room is a no-op.
    pub async fn handle_disconnect(state: &GatewayState, connection: &Arc<Connection>) {
        if !connection.is_viewer() {
            return;
        }

        let presentation_id = connection.presentation_id();
        let removed = {
            state
                .registry()
                .write()
                .remove_viewer(presentation_id, connection.user_id())
        };

        let Some(remaining) = removed else {
            return;
        };

        tracing::info!(
            connection_id = %connection.id(),
            presentation_id = %presentation_id,
            user_id = %connection.user_id(),
            viewers = remaining.len(),
            "Viewer left"
        );

        state
            .connections()
            .broadcast_to_room(presentation_id, ServerMessage::viewers_updated(&remaining))
            .await;

        if remaining.is_empty() {
            tracing::debug!(presentation_id = %presentation_id, "Removed empty room");
        }
    }
}
