//! # slidesync-core
//!
//! Domain layer for the realtime collaboration hub: room registry, viewer
//! presence entries, and connect modes. This crate has zero dependencies on
//! infrastructure (web framework, sockets, etc.) and does no locking — the
//! caller owns synchronization.

pub mod ids;
pub mod mode;
pub mod registry;
pub mod viewer;

// Re-export commonly used types at crate root
pub use ids::ConnectionId;
pub use mode::ConnectMode;
pub use registry::{Room, RoomRegistry};
pub use viewer::{Viewer, ANONYMOUS_NAME};
