//! WebSocket handler
//!
//! Accepts upgrade requests, validates connect parameters, attaches the
//! connection to its room, and runs the socket's receive/send loops.

use crate::connection::Connection;
use crate::events::ServerMessage;
use crate::handlers::{EventRouter, PresenceTracker};
use crate::protocol::{ClientMessage, CloseCode, ConnectParams};
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Channel buffer size for outgoing messages
const MESSAGE_BUFFER_SIZE: usize = 100;

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket, params))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket, params: ConnectParams) {
    // Refuse connections that do not identify themselves. No room mutation
    // has happened yet, so a plain close is all there is to do.
    let Some(identity) = params.into_identity() else {
        tracing::warn!("Connection missing required parameters, refusing");
        refuse(socket, CloseCode::MissingParameters).await;
        return;
    };

    // Create message channel for outgoing messages
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(MESSAGE_BUFFER_SIZE);
    let connection = Connection::new(identity, tx);

    // Join the presentation's broadcast group before any presence work so
    // the joiner receives its own viewers-updated snapshot.
    state.connections().register(connection.clone());

    tracing::info!(
        connection_id = %connection.id(),
        presentation_id = %connection.presentation_id(),
        user_id = %connection.user_id(),
        mode = %connection.mode(),
        "Connection established"
    );

    // Viewers additionally enter the presence registry and get a private
    // position snapshot; the messages queue until the send task drains them.
    if connection.is_viewer() {
        if let Err(e) = PresenceTracker::handle_join(&state, &connection).await {
            tracing::warn!(
                connection_id = %connection.id(),
                error = %e,
                "Viewer join incomplete"
            );
        }
    }

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    // Clone state for the receive task
    let state_recv = state.clone();
    let connection_recv = connection.clone();

    // Task to receive and route messages from the socket
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_message(&state_recv, &connection_recv, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        "Ignoring binary message"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Transport-level liveness; axum answers pings itself
                    tracing::trace!(connection_id = %connection_recv.id(), "Heartbeat frame");
                }
                Ok(Message::Close(_)) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        "Client closed connection"
                    );
                    break;
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_recv.id(),
                        error = %e,
                        "WebSocket error"
                    );
                    break;
                }
            }
        }
    });

    let connection_id_send = connection.id();

    // Task to forward queued messages to the socket
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match msg.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        connection_id = %connection_id_send,
                        error = %e,
                        "Failed to serialize outbound message"
                    );
                }
            }
        }

        // Close the socket when the channel is done
        let _ = ws_sink.close().await;
    });

    // Either side ending tears the other down; an abrupt transport failure
    // takes the same path as a clean close.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    }

    cleanup_connection(&state, &connection).await;
}

/// Handle a text message from the client.
///
/// Faults stay inside this function: an unparsable envelope or a payload
/// that fails validation is logged and dropped, the connection stays open,
/// and nothing is sent back to the sender.
async fn handle_text_message(state: &GatewayState, connection: &Arc<Connection>, text: &str) {
    let message = match ClientMessage::from_json(text) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(
                connection_id = %connection.id(),
                error = %e,
                "Dropping unparsable message"
            );
            return;
        }
    };

    tracing::trace!(
        connection_id = %connection.id(),
        event = %message.event,
        "Received event"
    );

    if let Err(e) = EventRouter::dispatch(state, connection, message).await {
        tracing::warn!(
            connection_id = %connection.id(),
            error = %e,
            "Event dropped"
        );
    }
}

/// Close a socket that never made it past parameter validation
async fn refuse(mut socket: WebSocket, code: CloseCode) {
    let frame = CloseFrame {
        code: code.as_u16(),
        reason: code.description().into(),
    };
    let _ = socket.send(Message::Close(Some(frame))).await;
}

/// Clean up a connection on disconnect. Runs exactly once per connection.
async fn cleanup_connection(state: &GatewayState, connection: &Arc<Connection>) {
    tracing::info!(
        connection_id = %connection.id(),
        presentation_id = %connection.presentation_id(),
        user_id = %connection.user_id(),
        age_secs = connection.age().as_secs(),
        "Connection closed"
    );

    // Leave the broadcast group first so the presence update below only
    // reaches the remaining room members.
    state.connections().unregister(connection.id());

    PresenceTracker::handle_disconnect(state, connection).await;
}
