use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::types::RoomSummary;
use crate::shared::{AppError, AppState};

/// HTTP handler for listing all active rooms
///
/// GET /rooms
#[instrument(name = "list_rooms", skip(state))]
pub async fn list_rooms(State(state): State<AppState>) -> Result<Json<Vec<RoomSummary>>, AppError> {
    let rooms = state.room_service.list_rooms().await?;

    info!(room_count = rooms.len(), "Rooms listed successfully");

    Ok(Json(rooms))
}

/// HTTP handler for a single room
///
/// GET /rooms/{room_id}
#[instrument(name = "get_room", skip(state))]
pub async fn get_room(
    Path(room_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RoomSummary>, AppError> {
    let room = state
        .room_service
        .get_room(&room_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", room_id)))?;

    Ok(Json(RoomSummary::from(&room)))
}
