use crate::{
    event::EventError,
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};
use std::sync::Arc;
use tracing::debug;

pub struct MessageBroadcaster;

impl MessageBroadcaster {
    /// Serializes and unicasts a message. Returns whether a live connection took it.
    pub async fn send_to_participant(
        connection_manager: &Arc<dyn ConnectionManager>,
        participant_id: &str,
        message: &WebSocketMessage,
    ) -> Result<bool, EventError> {
        let message_json = message.to_json()?;
        let delivered = connection_manager
            .emit_to(participant_id, &message_json)
            .await;

        debug!(
            participant_id = %participant_id,
            message_type = %message.message_type,
            delivered,
            "Outbound message"
        );

        Ok(delivered)
    }
}
