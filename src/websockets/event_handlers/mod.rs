pub mod connection_events;
pub mod room_events;
pub mod shared;
pub mod signal_events;

pub use connection_events::ConnectionEventHandlers;
pub use room_events::RoomEventHandlers;
pub use signal_events::SignalEventHandlers;
