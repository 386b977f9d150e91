use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    event::EventError,
    room::{repository::JoinRoomResult, RoomService},
    websockets::{connection_manager::ConnectionManager, messages::WebSocketMessage},
};

use super::shared::MessageBroadcaster;

pub struct RoomEventHandlers {
    room_service: Arc<RoomService>,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl RoomEventHandlers {
    pub fn new(room_service: Arc<RoomService>, connection_manager: Arc<dyn ConnectionManager>) -> Self {
        Self {
            room_service,
            connection_manager,
        }
    }

    /// Registers the caller as the examiner of a fresh room. Nobody is notified.
    pub async fn handle_examiner_join(
        &self,
        participant_id: &str,
        room_id: &str,
    ) -> Result<(), EventError> {
        debug!(room_id = %room_id, participant_id = %participant_id, "Handling examiner join");

        self.room_service
            .create_or_reset_room(room_id, participant_id)
            .await?;
        self.connection_manager
            .subscribe(participant_id, room_id)
            .await;

        Ok(())
    }

    pub async fn handle_student_join(
        &self,
        participant_id: &str,
        room_id: &str,
    ) -> Result<(), EventError> {
        debug!(room_id = %room_id, participant_id = %participant_id, "Handling student join");

        match self
            .room_service
            .join_as_student(room_id, participant_id)
            .await?
        {
            JoinRoomResult::Success(room) => {
                self.connection_manager
                    .subscribe(participant_id, room_id)
                    .await;

                let message = WebSocketMessage::student_joined(participant_id.to_string())?;
                MessageBroadcaster::send_to_participant(
                    &self.connection_manager,
                    &room.examiner,
                    &message,
                )
                .await?;

                info!(
                    room_id = %room_id,
                    student_id = %participant_id,
                    examiner_id = %room.examiner,
                    "Examiner notified of new student"
                );
            }
            JoinRoomResult::AlreadyJoined(_) => {
                self.connection_manager
                    .subscribe(participant_id, room_id)
                    .await;
            }
            JoinRoomResult::RoomNotFound => {
                MessageBroadcaster::send_to_participant(
                    &self.connection_manager,
                    participant_id,
                    &WebSocketMessage::room_not_found(),
                )
                .await?;
            }
        }

        Ok(())
    }
}
