//! # slidesync-gateway
//!
//! Realtime fan-out layer for collaborative slide editing: per-presentation
//! broadcast rooms, viewer presence, and relay of optimistic mutation hints.
//! Durable state lives in the presentation store service; this process keeps
//! nothing across restarts.

pub mod connection;
pub mod events;
pub mod handlers;
pub mod protocol;
pub mod server;

pub use server::run;
