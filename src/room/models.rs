use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role a participant holds inside a single room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantRole {
    Examiner,
    Student,
}

/// One entry of the participant index: which room, and in what role
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Membership {
    pub room_id: String,
    pub role: ParticipantRole,
}

impl Membership {
    pub fn examiner(room_id: &str) -> Self {
        Self {
            room_id: room_id.to_string(),
            role: ParticipantRole::Examiner,
        }
    }

    pub fn student(room_id: &str) -> Self {
        Self {
            room_id: room_id.to_string(),
            role: ParticipantRole::Student,
        }
    }
}

/// In-memory record of an active exam room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomModel {
    pub id: String,            // Caller-supplied room identifier
    pub examiner: String,      // Connection id of the room host
    pub students: Vec<String>, // Connection ids in join order
    pub created_at: DateTime<Utc>,
}

impl RoomModel {
    /// Creates a fresh room with no students
    pub fn new(room_id: String, examiner: String) -> Self {
        Self {
            id: room_id,
            examiner,
            students: vec![],
            created_at: Utc::now(),
        }
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn has_student(&self, participant_id: &str) -> bool {
        self.students.iter().any(|s| s == participant_id)
    }

    pub fn is_examiner(&self, participant_id: &str) -> bool {
        self.examiner == participant_id
    }

    /// Appends a student unless already present. Returns whether the list changed.
    pub fn add_student(&mut self, participant_id: &str) -> bool {
        if self.has_student(participant_id) {
            return false;
        }
        self.students.push(participant_id.to_string());
        true
    }

    /// Removes a student. Returns whether it was present.
    pub fn remove_student(&mut self, participant_id: &str) -> bool {
        let before = self.students.len();
        self.students.retain(|s| s != participant_id);
        self.students.len() != before
    }
}
