// Public API
pub use connection_manager::{ConnectionManager, InMemoryConnectionManager};
pub use handler::{websocket_handler, WebsocketReceiveHandler};
pub use messages::{ClientRequest, MessageType, ProtocolError, WebSocketMessage};
pub use signal_router::SignalRouter;
pub use socket::MessageHandler;

// Internal modules
mod connection_manager;
pub mod event_handlers;
mod handler;
pub mod messages;
mod signal_router;
mod socket;
