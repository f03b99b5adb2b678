//! Connection management
//!
//! Individual WebSocket connections and the broadcast-group manager.

mod connection;
mod manager;

pub use connection::{Connection, ConnectionIdentity};
pub use manager::ConnectionManager;
