// Library crate for the exam signaling server
// This file exposes the public API for integration tests

pub mod config;
pub mod event;
pub mod room;
pub mod shared;
pub mod websockets;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types for easier access in tests
pub use config::Config;
pub use event::{EventBus, EventSubscription, SignalEvent};
pub use room::{models::RoomModel, repository::RoomRepository, RoomService};
pub use shared::{AppError, AppState};
pub use websockets::{
    ConnectionManager, InMemoryConnectionManager, MessageHandler, MessageType, SignalRouter,
    WebSocketMessage, WebsocketReceiveHandler,
};

/// Wires registry, transport and router together and starts event processing
pub fn build_state(
    room_repository: Arc<dyn RoomRepository>,
    connection_manager: Arc<dyn ConnectionManager>,
) -> (AppState, JoinHandle<()>) {
    let room_service = Arc::new(RoomService::new(room_repository));
    let (event_bus, receiver) = EventBus::new();

    let router = SignalRouter::new(Arc::clone(&room_service), Arc::clone(&connection_manager));
    let subscription_handle = EventSubscription::new(receiver, Arc::new(router)).start();

    (
        AppState::new(room_service, connection_manager, event_bus),
        subscription_handle,
    )
}

pub fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods([Method::GET, Method::POST]);
    if config.cors_origin == "*" {
        return cors.allow_origin(Any);
    }
    match HeaderValue::from_str(&config.cors_origin) {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!(origin = %config.cors_origin, "Unusable CORS origin, allowing any");
            cors.allow_origin(Any)
        }
    }
}

pub fn app(app_state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/", get(|| async { "Signaling server running" }))
        .route("/rooms", get(room::list_rooms))
        .route("/rooms/:room_id", get(room::get_room))
        .route("/ws", get(websockets::websocket_handler))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::room::repository::InMemoryRoomRepository;
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    fn test_config() -> Config {
        Config {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            cors_origin: "*".to_string(),
        }
    }

    #[tokio::test]
    async fn test_liveness_route() {
        let (state, _handle) = build_state(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemoryConnectionManager::new()),
        );

        let response = app(state, &test_config())
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Signaling server running");
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_by_default() {
        let (state, _handle) = build_state(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemoryConnectionManager::new()),
        );

        let request = Request::builder()
            .uri("/rooms")
            .header("origin", "https://exam.example.com")
            .body(Body::empty())
            .unwrap();
        let response = app(state, &test_config()).oneshot(request).await.unwrap();

        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_websocket_route_requires_upgrade() {
        let (state, _handle) = build_state(
            Arc::new(InMemoryRoomRepository::new()),
            Arc::new(InMemoryConnectionManager::new()),
        );

        let response = app(state, &test_config())
            .oneshot(Request::builder().uri("/ws").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }
}
