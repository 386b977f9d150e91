// Event-driven core of the signaling server
//
// Socket tasks turn client frames and disconnects into `SignalEvent`s on the
// bus; a single subscription task feeds them to the router in arrival order.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::SignalEvent;
pub use handler::{EventError, EventHandler};
pub use subscription::EventSubscription;

// Internal modules
mod bus;
mod events;
mod handler;
mod subscription;
