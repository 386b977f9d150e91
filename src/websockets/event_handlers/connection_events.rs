use std::sync::Arc;
use tracing::info;

use crate::{
    event::EventError,
    room::{repository::Departure, RoomService},
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

use super::shared::MessageBroadcaster;

pub struct ConnectionEventHandlers {
    room_service: Arc<RoomService>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl ConnectionEventHandlers {
    pub fn new(room_service: Arc<RoomService>, connection_manager: Arc<dyn ConnectionManager>) -> Self {
        Self {
            room_service,
            connection_manager,
        }
    }

    /// Cleans up after a closed connection and tells affected examiners
    pub async fn handle_disconnect(&self, participant_id: &str) -> Result<(), EventError> {
        info!(participant_id = %participant_id, "Processing disconnect");

        self.connection_manager
            .remove_connection(participant_id)
            .await;

        let departures = self.room_service.remove_participant(participant_id).await?;

        for departure in departures {
            match departure {
                // Remaining students are not told; the room just disappears
                Departure::RoomClosed { room } => {
                    info!(
                        room_id = %room.id,
                        examiner_id = %participant_id,
                        "Room closed"
                    );
                }
                Departure::LeftRoom { room } => {
                    MessageBroadcaster::send_to_participant(
                        &self.connection_manager,
                        &room.examiner,
                        &WebSocketMessage::student_left(participant_id.to_string()),
                    )
                    .await?;
                }
            }
        }

        Ok(())
    }
}
