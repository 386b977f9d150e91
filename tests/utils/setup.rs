#![allow(dead_code)]

use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

use exam_signaling::{
    event::{EventBus, EventHandler, SignalEvent},
    room::repository::InMemoryRoomRepository,
    websockets::{SignalRouter, WebsocketReceiveHandler},
    RoomService,
};

use super::mocks::MockConnectionManager;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

/// Full inbound path (frame parsing, bus, router) over a mock transport.
/// Events are processed synchronously by `process_events` instead of a
/// spawned subscription, so every action is complete when it returns.
pub struct TestSetup {
    pub event_bus: EventBus,
    pub mock_conn_manager: Arc<MockConnectionManager>,
    pub input_handler: WebsocketReceiveHandler,
    pub room_service: Arc<RoomService>,
    pub participants: Vec<String>,
    router: SignalRouter,
    receiver: Mutex<mpsc::UnboundedReceiver<SignalEvent>>,
}

impl TestSetup {
    /// Hands every queued event to the router, in order
    pub async fn process_events(&self) {
        let mut receiver = self.receiver.lock().await;
        while let Ok(event) = receiver.try_recv() {
            self.router
                .handle_event(event)
                .await
                .expect("router should handle event");
        }
    }
}

pub struct TestSetupBuilder {
    participants: Vec<String>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            participants: vec![],
        }
    }

    pub fn with_participants(mut self, participants: Vec<&str>) -> Self {
        self.participants = participants.into_iter().map(|s| s.to_string()).collect();
        self
    }

    /// One examiner and two students, all connected, no rooms yet
    pub fn with_exam_participants(self) -> Self {
        self.with_participants(vec!["examiner", "student-1", "student-2"])
    }

    pub async fn build(self) -> TestSetup {
        let (event_bus, receiver) = EventBus::new();
        let repo = Arc::new(InMemoryRoomRepository::new());
        let room_service = Arc::new(RoomService::new(repo));
        let mock_conn_manager = Arc::new(MockConnectionManager::new());

        for participant in &self.participants {
            mock_conn_manager
                .add_connected_participant(participant)
                .await;
        }

        let router = SignalRouter::new(room_service.clone(), mock_conn_manager.clone());
        let input_handler = WebsocketReceiveHandler::new(event_bus.clone());

        TestSetup {
            event_bus,
            mock_conn_manager,
            input_handler,
            room_service,
            participants: self.participants,
            router,
            receiver: Mutex::new(receiver),
        }
    }
}
