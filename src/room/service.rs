use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    models::RoomModel,
    repository::{CreateRoomResult, Departure, JoinRoomResult, RoomRepository},
    types::RoomSummary,
};
use crate::shared::AppError;

/// Service for room membership rules on top of the registry
pub struct RoomService {
    repository: Arc<dyn RoomRepository>,
}

impl RoomService {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Creates the room, replacing whatever was registered under the same id
    #[instrument(skip(self))]
    pub async fn create_or_reset_room(
        &self,
        room_id: &str,
        examiner_id: &str,
    ) -> Result<RoomModel, AppError> {
        match self.repository.create_room(room_id, examiner_id).await? {
            CreateRoomResult::Created(room) => {
                info!(room_id = %room_id, examiner_id = %examiner_id, "Examiner created room");
                Ok(room)
            }
            CreateRoomResult::Replaced { room, previous } => {
                warn!(
                    room_id = %room_id,
                    examiner_id = %examiner_id,
                    previous_examiner = %previous.examiner,
                    discarded_students = previous.student_count(),
                    "Examiner re-created existing room, previous membership discarded"
                );
                Ok(room)
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn join_as_student(
        &self,
        room_id: &str,
        student_id: &str,
    ) -> Result<JoinRoomResult, AppError> {
        let result = self.repository.try_join_room(room_id, student_id).await?;

        match &result {
            JoinRoomResult::Success(room) => {
                info!(
                    room_id = %room_id,
                    student_id = %student_id,
                    student_count = room.student_count(),
                    "Student joined room"
                );
            }
            JoinRoomResult::AlreadyJoined(_) => {
                debug!(room_id = %room_id, student_id = %student_id, "Repeated join ignored");
            }
            JoinRoomResult::RoomNotFound => {
                info!(room_id = %room_id, student_id = %student_id, "Student join rejected, room not found");
            }
        }

        Ok(result)
    }

    /// Drops a disconnected participant from every room it belongs to
    #[instrument(skip(self))]
    pub async fn remove_participant(
        &self,
        participant_id: &str,
    ) -> Result<Vec<Departure>, AppError> {
        let departures = self.repository.remove_participant(participant_id).await?;

        for departure in &departures {
            match departure {
                Departure::RoomClosed { room } => {
                    info!(
                        room_id = %room.id,
                        orphaned_students = room.student_count(),
                        "Examiner disconnected, room closed"
                    );
                }
                Departure::LeftRoom { room } => {
                    info!(
                        room_id = %room.id,
                        student_id = %participant_id,
                        "Student left room"
                    );
                }
            }
        }

        Ok(departures)
    }

    #[instrument(skip(self))]
    pub async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        self.repository.get_room(room_id).await
    }

    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> Result<Vec<RoomSummary>, AppError> {
        let rooms = self.repository.list_rooms().await?;
        debug!(room_count = rooms.len(), "Rooms retrieved");
        Ok(rooms.iter().map(RoomSummary::from).collect())
    }
}
