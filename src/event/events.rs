use serde_json::Value;

/// Inbound signaling events, one per client frame or disconnect
///
/// Every event carries the participant that caused it. The router consumes
/// these strictly in the order the bus received them.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalEvent {
    /// Participant creates (or resets) a room and hosts it
    ExaminerJoinRoom {
        participant_id: String,
        room_id: String,
    },

    /// Participant asks to join an existing room as a student
    StudentJoinRoom {
        participant_id: String,
        room_id: String,
    },

    /// Opaque payload to be forwarded to another participant
    SendSignal {
        from: String,
        to: String,
        signal: Value,
    },

    /// Transport connection closed
    ParticipantDisconnected { participant_id: String },
}

impl SignalEvent {
    /// The participant whose connection produced this event
    pub fn participant_id(&self) -> &str {
        match self {
            SignalEvent::ExaminerJoinRoom { participant_id, .. } => participant_id,
            SignalEvent::StudentJoinRoom { participant_id, .. } => participant_id,
            SignalEvent::SendSignal { from, .. } => from,
            SignalEvent::ParticipantDisconnected { participant_id } => participant_id,
        }
    }

    pub fn event_type(&self) -> &'static str {
        match self {
            SignalEvent::ExaminerJoinRoom { .. } => "examiner_join_room",
            SignalEvent::StudentJoinRoom { .. } => "student_join_room",
            SignalEvent::SendSignal { .. } => "send_signal",
            SignalEvent::ParticipantDisconnected { .. } => "participant_disconnected",
        }
    }
}
