use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::RoomModel;

/// Read-only room view served by `GET /rooms`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoomSummary {
    pub id: String,
    pub examiner: String,
    pub student_count: usize,
    pub created_at: DateTime<Utc>,
}

impl From<&RoomModel> for RoomSummary {
    fn from(room: &RoomModel) -> Self {
        Self {
            id: room.id.clone(),
            examiner: room.examiner.clone(),
            student_count: room.student_count(),
            created_at: room.created_at,
        }
    }
}
