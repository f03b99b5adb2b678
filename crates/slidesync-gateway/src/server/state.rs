//! Gateway state
//!
//! Application state for the gateway server. The room registry is owned
//! here and injected into handlers — never a module-level global — so tests
//! can run isolated instances side by side.

use crate::connection::ConnectionManager;
use parking_lot::RwLock;
use slidesync_common::AppConfig;
use slidesync_core::RoomRegistry;
use std::sync::Arc;

/// Gateway application state
#[derive(Clone)]
pub struct GatewayState {
    /// Presence and slide-position registry
    registry: Arc<RwLock<RoomRegistry>>,
    /// Broadcast-group manager for live connections
    connections: Arc<ConnectionManager>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a fresh gateway state
    pub fn new(config: AppConfig) -> Self {
        Self {
            registry: Arc::new(RwLock::new(RoomRegistry::new())),
            connections: ConnectionManager::new_shared(),
            config: Arc::new(config),
        }
    }

    /// Get the room registry
    pub fn registry(&self) -> &RwLock<RoomRegistry> {
        &self.registry
    }

    /// Get the connection manager
    pub fn connections(&self) -> &ConnectionManager {
        &self.connections
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("connections", &self.connections)
            .field("rooms", &self.registry.read().room_count())
            .finish()
    }
}
