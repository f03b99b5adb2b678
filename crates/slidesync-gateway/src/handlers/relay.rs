//! Relay handlers
//!
//! `update-slide`, `update-presentation`, `add-slide`, and `delete-slide`
//! carry no server-side state: durable mutations happen over the store's
//! HTTP path, and these events are low-latency convergence hints so peers
//! can update their local view optimistically. The router validates the
//! minimal probe fields and forwards the client payload verbatim to the
//! room, minus the sender.

use super::HandlerResult;
use crate::connection::Connection;
use crate::events::ServerMessage;
use crate::protocol::ClientEventType;
use crate::server::GatewayState;
use serde_json::Value;
use std::sync::Arc;

/// Handles pure-relay events
pub struct RelayHandler;

impl RelayHandler {
    /// Forward an already-validated payload to the rest of the room
    pub async fn handle(
        state: &GatewayState,
        connection: &Arc<Connection>,
        event: ClientEventType,
        data: Value,
    ) -> HandlerResult<()> {
        let presentation_id = connection.presentation_id();

        tracing::debug!(
            connection_id = %connection.id(),
            presentation_id = %presentation_id,
            event = %event,
            "Relaying event"
        );

        state
            .connections()
            .send_to_room(
                presentation_id,
                ServerMessage::new(event.forwards_as(), data),
                Some(connection.id()),
            )
            .await;

        Ok(())
    }
}
