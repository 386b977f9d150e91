use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;

/// Transport-side registry of live connections and broadcast groups
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>);

    /// Drops the connection and its membership in every group
    async fn remove_connection(&self, connection_id: &str);

    /// Adds a connection to a named broadcast group
    async fn subscribe(&self, connection_id: &str, group_id: &str);

    /// Unicast. Returns false when no live connection has this id.
    async fn emit_to(&self, connection_id: &str, message: &str) -> bool;

    /// Broadcast to every subscriber of a group. Returns how many were reached.
    async fn emit_to_group(&self, group_id: &str, message: &str) -> usize;
}

#[derive(Default)]
struct ConnectionTable {
    // connection id -> sender
    senders: HashMap<String, mpsc::UnboundedSender<String>>,
    // group id -> connection ids
    groups: HashMap<String, HashSet<String>>,
}

pub struct InMemoryConnectionManager {
    table: Arc<RwLock<ConnectionTable>>,
}

impl Default for InMemoryConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(ConnectionTable::default())),
        }
    }

    pub async fn connection_count(&self) -> usize {
        self.table.read().await.senders.len()
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, connection_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut table = self.table.write().await;
        table.senders.insert(connection_id, sender);
    }

    async fn remove_connection(&self, connection_id: &str) {
        let mut table = self.table.write().await;
        table.senders.remove(connection_id);
        table.groups.retain(|_, members| {
            members.remove(connection_id);
            !members.is_empty()
        });
    }

    async fn subscribe(&self, connection_id: &str, group_id: &str) {
        let mut table = self.table.write().await;
        table
            .groups
            .entry(group_id.to_string())
            .or_default()
            .insert(connection_id.to_string());
    }

    async fn emit_to(&self, connection_id: &str, message: &str) -> bool {
        let table = self.table.read().await;
        match table.senders.get(connection_id) {
            Some(sender) => sender.send(message.to_string()).is_ok(),
            None => {
                debug!(connection_id = %connection_id, "No live connection, message dropped");
                false
            }
        }
    }

    async fn emit_to_group(&self, group_id: &str, message: &str) -> usize {
        let table = self.table.read().await;
        let Some(members) = table.groups.get(group_id) else {
            return 0;
        };

        members
            .iter()
            .filter_map(|id| table.senders.get(id))
            .filter(|sender| sender.send(message.to_string()).is_ok())
            .count()
    }
}
