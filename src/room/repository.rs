use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, instrument, warn};

use super::models::{Membership, ParticipantRole, RoomModel};
use crate::shared::AppError;

/// Result of creating (or re-creating) a room as examiner
#[derive(Debug, Clone)]
pub enum CreateRoomResult {
    /// No room existed under this id
    Created(RoomModel),
    /// An existing room was overwritten, its students discarded
    Replaced { room: RoomModel, previous: RoomModel },
}

/// Result of attempting to join a room as student
#[derive(Debug, Clone)]
pub enum JoinRoomResult {
    /// Student appended, returns updated room data
    Success(RoomModel),
    /// Student was already listed, nothing changed
    AlreadyJoined(RoomModel),
    /// Room does not exist
    RoomNotFound,
}

/// One consequence of a participant going away
#[derive(Debug, Clone, PartialEq)]
pub enum Departure {
    /// The participant was the examiner; the room is gone
    RoomClosed { room: RoomModel },
    /// The participant was a student; returns the room after removal
    LeftRoom { room: RoomModel },
}

/// Trait for room registry operations
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Unconditionally sets `room_id` to a fresh room hosted by `examiner_id`
    async fn create_room(
        &self,
        room_id: &str,
        examiner_id: &str,
    ) -> Result<CreateRoomResult, AppError>;

    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError>;

    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError>;

    /// Atomically checks the room exists and appends the student
    async fn try_join_room(
        &self,
        room_id: &str,
        student_id: &str,
    ) -> Result<JoinRoomResult, AppError>;

    /// Removes every trace of a participant, closing rooms it hosted
    async fn remove_participant(&self, participant_id: &str) -> Result<Vec<Departure>, AppError>;
}

#[derive(Default)]
struct RegistryState {
    rooms: HashMap<String, RoomModel>,
    // participant id -> rooms it appears in
    memberships: HashMap<String, HashSet<Membership>>,
}

impl RegistryState {
    fn index(&mut self, participant_id: &str, membership: Membership) {
        self.memberships
            .entry(participant_id.to_string())
            .or_default()
            .insert(membership);
    }

    fn unindex(&mut self, participant_id: &str, membership: &Membership) {
        if let Some(set) = self.memberships.get_mut(participant_id) {
            set.remove(membership);
            if set.is_empty() {
                self.memberships.remove(participant_id);
            }
        }
    }

    fn unindex_room(&mut self, room: &RoomModel) {
        self.unindex(&room.examiner, &Membership::examiner(&room.id));
        for student in &room.students {
            self.unindex(student, &Membership::student(&room.id));
        }
    }
}

/// In-memory room registry. All state is lost on restart.
pub struct InMemoryRoomRepository {
    state: Mutex<RegistryState>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    /// Creates a new empty registry
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState::default()),
        }
    }

    /// Memberships currently recorded for a participant
    #[cfg(test)]
    pub(crate) fn memberships_of(&self, participant_id: &str) -> Vec<Membership> {
        self.lock()
            .map(|state| {
                state
                    .memberships
                    .get(participant_id)
                    .map(|set| set.iter().cloned().collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, RegistryState>, AppError> {
        self.state.lock().map_err(|_| {
            warn!("Room registry lock poisoned");
            AppError::Internal
        })
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    #[instrument(skip(self))]
    async fn create_room(
        &self,
        room_id: &str,
        examiner_id: &str,
    ) -> Result<CreateRoomResult, AppError> {
        let mut state = self.lock()?;

        let room = RoomModel::new(room_id.to_string(), examiner_id.to_string());
        let previous = state.rooms.insert(room_id.to_string(), room.clone());
        if let Some(previous) = &previous {
            state.unindex_room(previous);
        }
        state.index(examiner_id, Membership::examiner(room_id));

        match previous {
            Some(previous) => {
                debug!(
                    room_id = %room_id,
                    examiner_id = %examiner_id,
                    previous_examiner = %previous.examiner,
                    "Room replaced"
                );
                Ok(CreateRoomResult::Replaced { room, previous })
            }
            None => {
                debug!(room_id = %room_id, examiner_id = %examiner_id, "Room created");
                Ok(CreateRoomResult::Created(room))
            }
        }
    }

    #[instrument(skip(self))]
    async fn get_room(&self, room_id: &str) -> Result<Option<RoomModel>, AppError> {
        let state = self.lock()?;
        let room = state.rooms.get(room_id).cloned();

        match &room {
            Some(r) => debug!(room_id = %room_id, examiner = %r.examiner, "Room found"),
            None => debug!(room_id = %room_id, "Room not found"),
        }

        Ok(room)
    }

    #[instrument(skip(self))]
    async fn list_rooms(&self) -> Result<Vec<RoomModel>, AppError> {
        let state = self.lock()?;
        let mut rooms: Vec<RoomModel> = state.rooms.values().cloned().collect();
        rooms.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(rooms)
    }

    #[instrument(skip(self))]
    async fn try_join_room(
        &self,
        room_id: &str,
        student_id: &str,
    ) -> Result<JoinRoomResult, AppError> {
        let mut state = self.lock()?;

        let updated_room = {
            let Some(room) = state.rooms.get_mut(room_id) else {
                debug!(room_id = %room_id, "Room not found");
                return Ok(JoinRoomResult::RoomNotFound);
            };

            if !room.add_student(student_id) {
                debug!(room_id = %room_id, student_id = %student_id, "Student already in room");
                return Ok(JoinRoomResult::AlreadyJoined(room.clone()));
            }

            room.clone()
        };
        state.index(student_id, Membership::student(room_id));

        debug!(
            room_id = %room_id,
            student_id = %student_id,
            student_count = updated_room.student_count(),
            "Student appended to room"
        );

        Ok(JoinRoomResult::Success(updated_room))
    }

    #[instrument(skip(self))]
    async fn remove_participant(&self, participant_id: &str) -> Result<Vec<Departure>, AppError> {
        let mut state = self.lock()?;

        let mut memberships: Vec<Membership> = state
            .memberships
            .remove(participant_id)
            .map(|set| set.into_iter().collect())
            .unwrap_or_default();
        // Examiner roles first, so a room hosted and joined by the same id closes once
        memberships.sort_by(|a, b| a.role.cmp(&b.role).then_with(|| a.room_id.cmp(&b.room_id)));

        let mut departures = Vec::new();
        for membership in memberships {
            match membership.role {
                ParticipantRole::Examiner => {
                    if let Some(room) = state.rooms.remove(&membership.room_id) {
                        state.unindex_room(&room);
                        departures.push(Departure::RoomClosed { room });
                    }
                }
                ParticipantRole::Student => {
                    if let Some(room) = state.rooms.get_mut(&membership.room_id) {
                        if room.remove_student(participant_id) {
                            departures.push(Departure::LeftRoom { room: room.clone() });
                        }
                    }
                }
            }
        }

        debug!(
            participant_id = %participant_id,
            departures = departures.len(),
            "Participant removed from registry"
        );

        Ok(departures)
    }

}
