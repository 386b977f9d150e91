use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::{
    event::{EventError, EventHandler, SignalEvent},
    room::RoomService,
    websockets::connection_manager::ConnectionManager,
};

use super::event_handlers::{ConnectionEventHandlers, RoomEventHandlers, SignalEventHandlers};

/// Routes signal events to the specialized handlers:
/// - RoomEventHandlers: examiner and student joins
/// - SignalEventHandlers: peer-to-peer relay
/// - ConnectionEventHandlers: disconnect cleanup
pub struct SignalRouter {
    room_handlers: RoomEventHandlers,
    signal_handlers: SignalEventHandlers,
    connection_handlers: ConnectionEventHandlers,
}

#[async_trait]
impl EventHandler for SignalRouter {
    async fn handle_event(&self, event: SignalEvent) -> Result<(), EventError> {
        debug!(
            event_type = event.event_type(),
            participant_id = %event.participant_id(),
            "Routing signal event"
        );

        match event {
            SignalEvent::ExaminerJoinRoom {
                participant_id,
                room_id,
            } => {
                self.room_handlers
                    .handle_examiner_join(&participant_id, &room_id)
                    .await
            }
            SignalEvent::StudentJoinRoom {
                participant_id,
                room_id,
            } => {
                self.room_handlers
                    .handle_student_join(&participant_id, &room_id)
                    .await
            }
            SignalEvent::SendSignal { from, to, signal } => {
                self.signal_handlers
                    .handle_send_signal(&from, &to, signal)
                    .await
            }
            SignalEvent::ParticipantDisconnected { participant_id } => {
                self.connection_handlers
                    .handle_disconnect(&participant_id)
                    .await
            }
        }
    }

    fn handler_name(&self) -> &'static str {
        "SignalRouter"
    }
}

impl SignalRouter {
    pub fn new(room_service: Arc<RoomService>, connection_manager: Arc<dyn ConnectionManager>) -> Self {
        let room_handlers =
            RoomEventHandlers::new(Arc::clone(&room_service), Arc::clone(&connection_manager));

        let signal_handlers = SignalEventHandlers::new(Arc::clone(&connection_manager));

        let connection_handlers =
            ConnectionEventHandlers::new(Arc::clone(&room_service), Arc::clone(&connection_manager));

        Self {
            room_handlers,
            signal_handlers,
            connection_handlers,
        }
    }
}
