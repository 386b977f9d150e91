use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use crate::{
    event::EventError,
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

use super::shared::MessageBroadcaster;

/// Forwards opaque signaling payloads between peers. Never looks at rooms.
pub struct SignalEventHandlers {
    connection_manager: Arc<dyn ConnectionManager>,
}

impl SignalEventHandlers {
    pub fn new(connection_manager: Arc<dyn ConnectionManager>) -> Self {
        Self { connection_manager }
    }

    pub async fn handle_send_signal(
        &self,
        from: &str,
        to: &str,
        signal: Value,
    ) -> Result<(), EventError> {
        let message = WebSocketMessage::receive_signal(signal, from.to_string())?;
        let delivered =
            MessageBroadcaster::send_to_participant(&self.connection_manager, to, &message).await?;

        // Unreachable targets are not reported back to the sender
        if !delivered {
            debug!(from = %from, to = %to, "Signal target unreachable, dropped");
        }

        Ok(())
    }
}
