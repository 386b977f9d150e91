use async_trait::async_trait;
use thiserror::Error;

use super::events::SignalEvent;
use crate::shared::AppError;

/// Errors that can occur when handling signal events
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Registry error: {0}")]
    Registry(#[from] AppError),

    #[error("Failed to serialize outbound message: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Trait for components that consume signal events
///
/// Handlers are called one event at a time; an event is fully processed,
/// including outbound delivery, before the next one is handed over.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle_event(&self, event: SignalEvent) -> Result<(), EventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}
