#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use exam_signaling::websockets::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Records outbound frames per connection instead of writing to sockets.
/// Frames addressed to connections that are not live are dropped, like the real transport.
#[derive(Clone, Default)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, VecDeque<String>>>>,
    connected: Arc<RwLock<HashSet<String>>>,
    groups: Arc<RwLock<HashMap<String, HashSet<String>>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_connected_participant(&self, connection_id: &str) {
        self.connected
            .write()
            .await
            .insert(connection_id.to_string());
    }

    pub async fn is_connected(&self, connection_id: &str) -> bool {
        self.connected.read().await.contains(connection_id)
    }

    pub async fn group_members(&self, group_id: &str) -> HashSet<String> {
        self.groups
            .read()
            .await
            .get(group_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn get_messages_for(&self, connection_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(connection_id)
            .map(|queue| queue.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Pops the oldest recorded frame for a connection
    pub async fn consume_message_for(&self, connection_id: &str) -> Option<String> {
        self.sent_messages
            .write()
            .await
            .get_mut(connection_id)
            .and_then(|queue| queue.pop_front())
    }

    pub async fn clear_messages(&self) {
        self.sent_messages.write().await.clear();
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, connection_id: String, _sender: mpsc::UnboundedSender<String>) {
        self.add_connected_participant(&connection_id).await;
    }

    async fn remove_connection(&self, connection_id: &str) {
        self.connected.write().await.remove(connection_id);
        for members in self.groups.write().await.values_mut() {
            members.remove(connection_id);
        }
    }

    async fn subscribe(&self, connection_id: &str, group_id: &str) {
        self.groups
            .write()
            .await
            .entry(group_id.to_string())
            .or_default()
            .insert(connection_id.to_string());
    }

    async fn emit_to(&self, connection_id: &str, message: &str) -> bool {
        if !self.is_connected(connection_id).await {
            return false;
        }
        self.sent_messages
            .write()
            .await
            .entry(connection_id.to_string())
            .or_default()
            .push_back(message.to_string());
        true
    }

    async fn emit_to_group(&self, group_id: &str, message: &str) -> usize {
        let members = self.group_members(group_id).await;
        let mut reached = 0;
        for member in members {
            if self.emit_to(&member, message).await {
                reached += 1;
            }
        }
        reached
    }
}
