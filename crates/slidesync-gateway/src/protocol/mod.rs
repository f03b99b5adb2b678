//! Gateway wire protocol
//!
//! Defines the inbound message envelope, event names, validation payloads,
//! connect parameters, and close codes.

mod close_codes;
mod events;
mod messages;
mod payloads;

pub use close_codes::CloseCode;
pub use events::ClientEventType;
pub use messages::ClientMessage;
pub use payloads::{ConnectParams, SlideChangePayload, SlideIndexPayload};
