#![allow(dead_code)]

use serde_json::{json, Value};

use exam_signaling::{event::SignalEvent, websockets::MessageHandler};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Deliver a raw text frame from a participant and process the result
    pub async fn send_frame(&self, participant: &str, frame: &str) {
        self.input_handler
            .handle_message(participant, frame.to_string())
            .await;
        self.process_events().await;
    }

    pub async fn send_json(&self, participant: &str, frame: Value) {
        self.send_frame(participant, &frame.to_string()).await;
    }

    /// Simulate the transport reporting a closed socket
    pub async fn disconnect(&self, participant: &str) {
        self.event_bus.emit(SignalEvent::ParticipantDisconnected {
            participant_id: participant.to_string(),
        });
        self.process_events().await;
    }

    /// Register a participant that connects mid-test
    pub async fn connect(&self, participant: &str) {
        self.mock_conn_manager
            .add_connected_participant(participant)
            .await;
    }

    pub async fn clear_messages(&self) {
        self.mock_conn_manager.clear_messages().await;
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    pub async fn examiner_join(&self, participant: &str, room_id: &str) {
        self.send_json(
            participant,
            json!({"type": "examiner-join-room", "payload": {"roomId": room_id}}),
        )
        .await;
    }

    pub async fn student_join(&self, participant: &str, room_id: &str) {
        self.send_json(
            participant,
            json!({"type": "student-join-room", "payload": room_id}),
        )
        .await;
    }

    pub async fn send_signal(&self, from: &str, to: &str, signal: Value) {
        self.send_json(
            from,
            json!({"type": "send-signal", "payload": {"to": to, "signal": signal}}),
        )
        .await;
    }

    /// Current student list of a room, None if the room does not exist
    pub async fn students_of(&self, room_id: &str) -> Option<Vec<String>> {
        self.room_service
            .get_room(room_id)
            .await
            .expect("registry should be readable")
            .map(|room| room.students)
    }

    pub async fn examiner_of(&self, room_id: &str) -> Option<String> {
        self.room_service
            .get_room(room_id)
            .await
            .expect("registry should be readable")
            .map(|room| room.examiner)
    }
}
