use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::{events::SignalEvent, handler::EventHandler};

/// Drains the event bus and routes each event to the handler, one at a time
pub struct EventSubscription {
    receiver: mpsc::UnboundedReceiver<SignalEvent>,
    handler: Arc<dyn EventHandler>,
}

impl EventSubscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<SignalEvent>, handler: Arc<dyn EventHandler>) -> Self {
        Self { receiver, handler }
    }

    /// Spawns the processing task. It ends when every `EventBus` clone is dropped.
    pub fn start(self) -> JoinHandle<()> {
        let handler_name = self.handler.handler_name();
        info!(handler = handler_name, "Starting event subscription");

        tokio::spawn(self.run())
    }

    async fn run(mut self) {
        let handler_name = self.handler.handler_name();

        while let Some(event) = self.receiver.recv().await {
            let event_type = event.event_type();
            let participant_id = event.participant_id().to_string();

            if let Err(e) = self.handler.handle_event(event).await {
                warn!(
                    handler = handler_name,
                    event_type,
                    participant_id = %participant_id,
                    error = %e,
                    "Signal event handler failed"
                );
            }
        }

        info!(handler = handler_name, "Event subscription ended - bus closed");
    }
}
