use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::events::SignalEvent;

/// Single ordered queue feeding the signal router
///
/// Cloned into every socket task. Exactly one receiver exists, owned by the
/// `EventSubscription` that drains it.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: mpsc::UnboundedSender<SignalEvent>,
}

impl EventBus {
    /// Creates the bus along with the receiving end for the subscription
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SignalEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Queues an event. Returns false once the subscription has stopped.
    pub fn emit(&self, event: SignalEvent) -> bool {
        let event_type = event.event_type();
        match self.sender.send(event) {
            Ok(()) => {
                debug!(event_type, "Signal event queued");
                true
            }
            Err(_) => {
                warn!(event_type, "Signal event dropped, no subscription running");
                false
            }
        }
    }
}
