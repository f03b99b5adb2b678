//! `slide-change` handler
//!
//! The one event the router tracks itself: the room's last-known slide
//! position feeds the snapshot sent to late-joining viewers. The value is
//! advisory and last-write-wins — concurrent presenters are not arbitrated.

use super::HandlerResult;
use crate::connection::Connection;
use crate::events::ServerMessage;
use crate::protocol::SlideChangePayload;
use crate::server::GatewayState;
use std::sync::Arc;

/// Handles `slide-change` events
pub struct SlideChangeHandler;

impl SlideChangeHandler {
    /// Record the new position and relay it to the rest of the room
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        payload: SlideChangePayload,
    ) -> HandlerResult<()> {
        let presentation_id = connection.presentation_id();
        let index = payload.current_slide_index;

        // No-op when no viewer has created the room yet; the relay below
        // still goes out so attached editors stay in sync.
        let tracked = state.registry().write().set_slide(presentation_id, index);

        tracing::debug!(
            connection_id = %connection.id(),
            presentation_id = %presentation_id,
            slide = index,
            tracked = tracked,
            "Slide change"
        );

        state
            .connections()
            .send_to_room(
                presentation_id,
                ServerMessage::slide_changed(index),
                Some(connection.id()),
            )
            .await;

        Ok(())
    }
}
