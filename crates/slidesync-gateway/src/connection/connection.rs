//! Individual WebSocket connection
//!
//! A connection's identity (presentation, user, display name, mode) is
//! derived once from the connect parameters and immutable afterwards; the
//! only live state is the outbound message channel.

use crate::events::ServerMessage;
use slidesync_core::{ConnectMode, ConnectionId, ANONYMOUS_NAME};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Identity a connection presents at attach time. Trusted as-is; the
/// gateway does not authenticate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionIdentity {
    pub presentation_id: String,
    pub user_id: String,
    pub display_name: String,
    pub mode: ConnectMode,
}

impl ConnectionIdentity {
    /// Build an identity, defaulting the display name when absent
    #[must_use]
    pub fn new(
        presentation_id: impl Into<String>,
        user_id: impl Into<String>,
        display_name: Option<String>,
        mode: ConnectMode,
    ) -> Self {
        Self {
            presentation_id: presentation_id.into(),
            user_id: user_id.into(),
            display_name: display_name.unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
            mode,
        }
    }
}

/// A single WebSocket connection
pub struct Connection {
    /// Unique connection id
    id: ConnectionId,

    /// Identity quad, fixed for the connection's lifetime
    identity: ConnectionIdentity,

    /// Channel to the socket's send task
    sender: mpsc::Sender<ServerMessage>,

    /// Connection creation time
    created_at: Instant,
}

impl Connection {
    /// Create a new connection
    pub fn new(identity: ConnectionIdentity, sender: mpsc::Sender<ServerMessage>) -> Arc<Self> {
        Arc::new(Self {
            id: ConnectionId::new(),
            identity,
            sender,
            created_at: Instant::now(),
        })
    }

    /// Get the connection id
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Presentation this connection is attached to
    pub fn presentation_id(&self) -> &str {
        &self.identity.presentation_id
    }

    /// Externally supplied user id
    pub fn user_id(&self) -> &str {
        &self.identity.user_id
    }

    /// Display name (defaulted when the client supplied none)
    pub fn display_name(&self) -> &str {
        &self.identity.display_name
    }

    /// Declared connect mode
    pub fn mode(&self) -> ConnectMode {
        self.identity.mode
    }

    /// Whether this connection participates in presence tracking
    pub fn is_viewer(&self) -> bool {
        self.identity.mode.is_viewer()
    }

    /// Get connection age
    pub fn age(&self) -> std::time::Duration {
        self.created_at.elapsed()
    }

    /// Send a message to this connection
    pub async fn send(
        &self,
        message: ServerMessage,
    ) -> Result<(), mpsc::error::SendError<ServerMessage>> {
        self.sender.send(message).await
    }

    /// Try to send a message (non-blocking)
    pub fn try_send(
        &self,
        message: ServerMessage,
    ) -> Result<(), mpsc::error::TrySendError<ServerMessage>> {
        self.sender.try_send(message)
    }

    /// Check if the send side is closed
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("presentation_id", &self.identity.presentation_id)
            .field("user_id", &self.identity.user_id)
            .field("mode", &self.identity.mode)
            .finish()
    }
}
