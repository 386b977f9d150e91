use async_trait::async_trait;
use axum::{
    extract::{State, WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::event::{EventBus, SignalEvent};
use crate::shared::AppState;
use crate::websockets::messages::ClientRequest;

use super::socket::{Connection, MessageHandler};

/// Message handler for receiving WebSocket messages from the client
pub struct WebsocketReceiveHandler {
    event_bus: EventBus,
}

impl WebsocketReceiveHandler {
    pub fn new(event_bus: EventBus) -> Self {
        Self { event_bus }
    }

    fn to_event(connection_id: &str, request: ClientRequest) -> SignalEvent {
        let participant_id = connection_id.to_string();
        match request {
            ClientRequest::ExaminerJoinRoom { room_id } => SignalEvent::ExaminerJoinRoom {
                participant_id,
                room_id,
            },
            ClientRequest::StudentJoinRoom { room_id } => SignalEvent::StudentJoinRoom {
                participant_id,
                room_id,
            },
            ClientRequest::SendSignal { to, signal } => SignalEvent::SendSignal {
                from: participant_id,
                to,
                signal,
            },
        }
    }
}

#[async_trait]
impl MessageHandler for WebsocketReceiveHandler {
    async fn handle_message(&self, connection_id: &str, message: String) {
        match ClientRequest::parse(&message) {
            Ok(request) => {
                self.event_bus.emit(Self::to_event(connection_id, request));
            }
            Err(e) => {
                warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Dropping unusable WebSocket frame"
                );
            }
        }
    }
}

/// WebSocket endpoint
/// GET /ws, every accepted socket becomes a new participant
#[instrument(name = "websocket_handler", skip(ws, app_state))]
pub async fn websocket_handler(ws: WebSocketUpgrade, State(app_state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_websocket_connection(socket, app_state))
}

/// Handle the upgraded WebSocket connection
async fn handle_websocket_connection(socket: axum::extract::ws::WebSocket, app_state: AppState) {
    let connection_id = Uuid::new_v4().to_string();
    info!(connection_id = %connection_id, "User connected");

    // Create the outbound channel (app -> client)
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();

    app_state
        .connection_manager
        .add_connection(connection_id.clone(), outbound_sender)
        .await;

    let message_handler = Arc::new(WebsocketReceiveHandler::new(app_state.event_bus.clone()));

    let connection = Connection::new(
        connection_id.clone(),
        Box::new(socket),
        outbound_receiver,
        message_handler,
    );

    // Run the connection until disconnect
    match connection.run().await {
        Ok(()) => {
            info!(connection_id = %connection_id, "User disconnected");
        }
        Err(e) => {
            warn!(
                connection_id = %connection_id,
                error = %e,
                "WebSocket connection error, treating as disconnect"
            );
        }
    }

    // The router removes the connection and updates rooms in event order
    app_state
        .event_bus
        .emit(SignalEvent::ParticipantDisconnected {
            participant_id: connection_id,
        });
}
