//! Event handlers
//!
//! Routes incoming client messages to the appropriate handler after
//! validating the payload shape each event requires.

mod error;
mod presence;
mod relay;
mod slide_change;

pub use error::{HandlerError, HandlerResult};
pub use presence::PresenceTracker;
pub use relay::RelayHandler;
pub use slide_change::SlideChangeHandler;

use crate::connection::Connection;
use crate::protocol::{ClientEventType, ClientMessage, SlideChangePayload, SlideIndexPayload};
use crate::server::GatewayState;
use std::sync::Arc;

/// Dispatch incoming client messages to the appropriate handler
pub struct EventRouter;

impl EventRouter {
    /// Handle a parsed client message.
    ///
    /// An `Err` here means the message was invalid for its event; the
    /// caller logs it and moves on — the connection stays open and no
    /// reply goes back to the sender.
    pub async fn dispatch(
        state: &GatewayState,
        connection: &Arc<Connection>,
        message: ClientMessage,
    ) -> HandlerResult<()> {
        match message.event {
            ClientEventType::SlideChange => {
                let payload: SlideChangePayload = message.payload().ok_or_else(|| {
                    HandlerError::InvalidPayload(
                        "slide-change requires an integer currentSlideIndex".to_string(),
                    )
                })?;

                SlideChangeHandler::handle(state, connection, payload).await
            }
            ClientEventType::UpdateSlide | ClientEventType::DeleteSlide => {
                // Probe the index, then forward the payload untouched
                let _: SlideIndexPayload = message.payload().ok_or_else(|| {
                    HandlerError::InvalidPayload(format!(
                        "{} requires an integer slideIndex",
                        message.event
                    ))
                })?;

                let data = message
                    .raw_payload()
                    .cloned()
                    .ok_or(HandlerError::MissingPayload)?;

                RelayHandler::handle(state, connection, message.event, data).await
            }
            ClientEventType::UpdatePresentation | ClientEventType::AddSlide => {
                let data = message
                    .raw_payload()
                    .cloned()
                    .ok_or(HandlerError::MissingPayload)?;

                RelayHandler::handle(state, connection, message.event, data).await
            }
        }
    }
}
