use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter};
use thiserror::Error;

/// Text sent with `room-not-found`
pub const ROOM_NOT_FOUND_MESSAGE: &str = "The exam room ID is invalid.";

/// Message types for WebSocket communication
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, AsRefStr, Display, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum MessageType {
    // Client -> Server
    ExaminerJoinRoom,
    StudentJoinRoom,
    SendSignal,

    // Server -> Client
    RoomNotFound,
    StudentJoined,
    ReceiveSignal,
    StudentLeft,
}

/// Metadata for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessageMeta {
    pub timestamp: DateTime<Utc>,
}

/// Base structure for WebSocket messages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebSocketMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default)]
    pub payload: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<WebSocketMessageMeta>,
}

/// Envelope of a client frame. Inbound `meta` is never read, so any shape is accepted.
#[derive(Debug, Deserialize)]
struct ClientFrame {
    #[serde(rename = "type")]
    message_type: MessageType,
    #[serde(default)]
    payload: Value,
}

/// Client-to-Server message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExaminerJoinPayload {
    pub room_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendSignalPayload {
    pub to: String,
    // A missing signal is relayed as an explicit `null`
    #[serde(default)]
    pub signal: Value,
}

/// Server-to-Client message payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentJoinedPayload {
    pub student_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiveSignalPayload {
    pub signal: Value,
    pub from: String,
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Message type {0} cannot be sent by a client")]
    UnexpectedType(MessageType),
}

/// A validated client request
#[derive(Debug, Clone, PartialEq)]
pub enum ClientRequest {
    ExaminerJoinRoom { room_id: String },
    StudentJoinRoom { room_id: String },
    SendSignal { to: String, signal: Value },
}

impl ClientRequest {
    /// Parses a raw text frame into a request
    pub fn parse(text: &str) -> Result<Self, ProtocolError> {
        let message: ClientFrame = serde_json::from_str(text)?;

        match message.message_type {
            MessageType::ExaminerJoinRoom => {
                let payload: ExaminerJoinPayload = serde_json::from_value(message.payload)?;
                Ok(ClientRequest::ExaminerJoinRoom {
                    room_id: payload.room_id,
                })
            }
            // Payload is the bare room id
            MessageType::StudentJoinRoom => {
                let room_id: String = serde_json::from_value(message.payload)?;
                Ok(ClientRequest::StudentJoinRoom { room_id })
            }
            MessageType::SendSignal => {
                let payload: SendSignalPayload = serde_json::from_value(message.payload)?;
                Ok(ClientRequest::SendSignal {
                    to: payload.to,
                    signal: payload.signal,
                })
            }
            other => Err(ProtocolError::UnexpectedType(other)),
        }
    }
}

/// Helper functions for creating messages
impl WebSocketMessage {
    pub fn new(message_type: MessageType, payload: Value) -> Self {
        Self {
            message_type,
            payload,
            meta: Some(WebSocketMessageMeta {
                timestamp: Utc::now(),
            }),
        }
    }

    /// Create a `room-not-found` message
    pub fn room_not_found() -> Self {
        Self::new(
            MessageType::RoomNotFound,
            Value::String(ROOM_NOT_FOUND_MESSAGE.to_string()),
        )
    }

    /// Create a `student-joined` message
    pub fn student_joined(student_id: String) -> Result<Self, serde_json::Error> {
        let payload = StudentJoinedPayload { student_id };
        Ok(Self::new(
            MessageType::StudentJoined,
            serde_json::to_value(payload)?,
        ))
    }

    /// Create a `receive-signal` message
    pub fn receive_signal(signal: Value, from: String) -> Result<Self, serde_json::Error> {
        let payload = ReceiveSignalPayload { signal, from };
        Ok(Self::new(
            MessageType::ReceiveSignal,
            serde_json::to_value(payload)?,
        ))
    }

    /// Create a `student-left` message; the payload is the bare id
    pub fn student_left(student_id: String) -> Self {
        Self::new(MessageType::StudentLeft, Value::String(student_id))
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
