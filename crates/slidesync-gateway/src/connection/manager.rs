//! Connection manager
//!
//! Tracks all live connections and the broadcast group (room) each one
//! belongs to, using `DashMap` for thread-safe access. Rooms here are pure
//! fan-out targets; presence bookkeeping lives in the room registry.

use super::Connection;
use crate::events::ServerMessage;
use dashmap::DashMap;
use slidesync_core::ConnectionId;
use std::collections::HashSet;
use std::sync::Arc;

/// Manages all active WebSocket connections
pub struct ConnectionManager {
    /// Active connections by connection id
    connections: DashMap<ConnectionId, Arc<Connection>>,

    /// Presentation id to connection ids mapping (the broadcast groups)
    rooms: DashMap<String, HashSet<ConnectionId>>,
}

impl ConnectionManager {
    /// Create a new connection manager
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
        }
    }

    /// Create a new connection manager wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a connection and join it to its presentation's broadcast
    /// group. Every mode joins the group; presence is handled elsewhere.
    pub fn register(&self, connection: Arc<Connection>) {
        let id = connection.id();
        let presentation_id = connection.presentation_id().to_string();

        self.connections.insert(id, connection);
        self.rooms.entry(presentation_id).or_default().insert(id);

        tracing::debug!(connection_id = %id, "Connection registered");
    }

    /// Remove a connection from the manager and its broadcast group.
    ///
    /// Uses `alter`/`retain` for atomic modify-and-cleanup to avoid TOCTOU
    /// races on the room sets. Safe to call for an already-removed id.
    pub fn unregister(&self, id: ConnectionId) {
        if let Some((_, connection)) = self.connections.remove(&id) {
            let presentation_id = connection.presentation_id().to_string();

            // Atomically drop the id from its room set
            self.rooms.alter(&presentation_id, |_, mut members| {
                members.remove(&id);
                members
            });

            // Clean up empty broadcast groups
            self.rooms.retain(|_, members| !members.is_empty());

            tracing::debug!(connection_id = %id, "Connection unregistered");
        }
    }

    /// Get a connection by id
    pub fn get(&self, id: ConnectionId) -> Option<Arc<Connection>> {
        self.connections.get(&id).map(|r| r.clone())
    }

    /// Get all connections in a presentation's broadcast group
    pub fn room_connections(&self, presentation_id: &str) -> Vec<Arc<Connection>> {
        self.rooms
            .get(presentation_id)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Send a message to every connection in a room, optionally excluding
    /// one (the sender of the event being relayed). Returns the number of
    /// connections the message was queued for.
    pub async fn send_to_room(
        &self,
        presentation_id: &str,
        message: ServerMessage,
        exclude: Option<ConnectionId>,
    ) -> usize {
        let connections = self.room_connections(presentation_id);
        let mut sent = 0;

        for conn in connections {
            if Some(conn.id()) == exclude {
                continue;
            }

            if conn.send(message.clone()).await.is_ok() {
                sent += 1;
            }
        }

        tracing::trace!(
            presentation_id = %presentation_id,
            event = %message.event,
            sent = sent,
            "Message sent to room"
        );

        sent
    }

    /// Send a message to every connection in a room, sender included
    pub async fn broadcast_to_room(&self, presentation_id: &str, message: ServerMessage) -> usize {
        self.send_to_room(presentation_id, message, None).await
    }

    /// Get the total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Get the number of presentations with active connections
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Get the number of connections in one room
    pub fn room_size(&self, presentation_id: &str) -> usize {
        self.rooms
            .get(presentation_id)
            .map_or(0, |members| members.len())
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("connections", &self.connections.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
