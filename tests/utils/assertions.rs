//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use serde_json::Value;

use exam_signaling::websockets::{MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    participants: Vec<&'a str>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for every participant in the setup
    pub fn for_all_participants(setup: &'a TestSetup) -> Self {
        let participants = setup.participants.iter().map(|s| s.as_str()).collect();
        Self {
            setup,
            participants,
        }
    }

    /// Create an assertion for specific participants
    pub fn for_participants(setup: &'a TestSetup, participants: Vec<&'a str>) -> Self {
        Self {
            setup,
            participants,
        }
    }

    pub fn for_participant(setup: &'a TestSetup, participant: &'a str) -> Self {
        Self::for_participants(setup, vec![participant])
    }

    /// Assert that participants received a specific message type (consumes the message from queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];

        for participant in &self.participants {
            let message = self
                .setup
                .mock_conn_manager
                .consume_message_for(participant)
                .await
                .unwrap_or_else(|| panic!("{} should have received a message", participant));

            let msg: WebSocketMessage = serde_json::from_str(&message).unwrap();
            assert_eq!(
                msg.message_type, expected_type,
                "{} received wrong message type",
                participant
            );
            assert!(msg.meta.is_some(), "outbound messages carry meta");
            messages.push(msg);
        }

        MessageContent {
            payload: messages[0].payload.clone(),
        }
    }

    /// Assert that participants have no (remaining) messages
    pub async fn received_no_messages(self) {
        for participant in &self.participants {
            let messages = self
                .setup
                .mock_conn_manager
                .get_messages_for(participant)
                .await;
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                participant,
                messages
            );
        }
    }

    /// Count how many messages of a specific type a participant received (non-consuming)
    pub async fn count_message_type(&self, participant: &str, msg_type: MessageType) -> usize {
        let messages = self
            .setup
            .mock_conn_manager
            .get_messages_for(participant)
            .await;
        messages
            .iter()
            .filter_map(|msg_str| serde_json::from_str::<WebSocketMessage>(msg_str).ok())
            .filter(|msg| msg.message_type == msg_type)
            .count()
    }
}

// ============================================================================
// Message Content Assertions
// ============================================================================

pub struct MessageContent {
    payload: Value,
}

impl MessageContent {
    pub fn with_payload(self, expected: Value) -> Self {
        assert_eq!(self.payload, expected);
        self
    }

    /// Assert the `student-joined` payload names this student
    pub fn with_student_id(self, expected_student: &str) -> Self {
        assert_eq!(self.payload["studentId"], expected_student);
        self
    }

    /// Assert the `receive-signal` sender
    pub fn from_participant(self, expected_sender: &str) -> Self {
        assert_eq!(self.payload["from"], expected_sender);
        self
    }

    pub fn with_signal(self, expected_signal: Value) -> Self {
        assert_eq!(self.payload["signal"], expected_signal);
        self
    }
}
