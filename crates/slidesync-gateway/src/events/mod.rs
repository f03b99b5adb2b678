//! Gateway events
//!
//! Outbound event names, payloads, and the message envelope sent to clients.

mod event_types;
mod payloads;

pub use event_types::ServerEventType;
pub use payloads::{ServerMessage, SlideChangedEvent, ViewerPayload, ViewersUpdatedEvent};
