//! Server bootstrap and execution logic.

use std::{collections::HashMap, future::Future, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use kaiwa_shared::time::Clock;
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::ServerConfig,
    domain::{MessagePusher, MessageStore},
    infrastructure::{
        message_pusher::WebSocketMessagePusher, presence::InMemoryPresenceRepository,
    },
    usecase::{
        AnnouncePresenceUseCase, ChatDispatcher, DisconnectSessionUseCase, GetMessagesUseCase,
        PresencePublisher, RelayTypingUseCase, ReplayHistoryUseCase, SendMessageUseCase,
        SessionHub,
    },
};

use super::{
    error::ServerError,
    handler::{get_messages, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Chat session hub server
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryMessageStore::new(Arc::new(SystemClock)));
/// let server = Server::new(config, store, Arc::new(SystemClock));
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    /// MessageStore（永続化の抽象化）
    store: Arc<dyn MessageStore>,
    /// サーバー時刻
    clock: Arc<dyn Clock>,
}

impl Server {
    pub fn new(config: ServerConfig, store: Arc<dyn MessageStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            store,
            clock,
        }
    }

    /// Probe the store and wire every component into a router.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::StoreUnavailable`] when the store does not answer;
    /// the hub is not started in that case.
    pub async fn router(&self) -> Result<Router, ServerError> {
        self.store.ping().await?;
        tracing::info!("Message store is reachable");

        let app_state = Arc::new(self.build_state());

        Ok(Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/messages", get(get_messages))
            .layer(TraceLayer::new_for_http())
            .layer(build_cors_layer(&self.config.allowed_origins))
            .with_state(app_state))
    }

    // Initialize dependencies in order:
    // 1. Repository / MessagePusher
    // 2. UseCases
    // 3. SessionHub
    fn build_state(&self) -> AppState {
        let offset = self.config.offset();

        let presence = Arc::new(InMemoryPresenceRepository::default());
        let message_pusher: Arc<dyn MessagePusher> = Arc::new(WebSocketMessagePusher::new(
            Arc::new(Mutex::new(HashMap::new())),
            offset,
        ));

        let send_message_usecase = Arc::new(SendMessageUseCase::new(
            self.store.clone(),
            message_pusher.clone(),
            self.clock.clone(),
        ));
        // The dispatch task lives as long as the hub holds the dispatcher
        let (chat_dispatcher, _dispatch_task) = ChatDispatcher::spawn(send_message_usecase);
        let presence_publisher = Arc::new(PresencePublisher::new(
            presence,
            message_pusher.clone(),
        ));

        let hub = SessionHub::new(
            message_pusher.clone(),
            Arc::new(ReplayHistoryUseCase::new(
                self.store.clone(),
                message_pusher.clone(),
                self.config.history_limit,
            )),
            Arc::new(AnnouncePresenceUseCase::new(presence_publisher.clone())),
            chat_dispatcher,
            Arc::new(RelayTypingUseCase::new(message_pusher.clone())),
            Arc::new(DisconnectSessionUseCase::new(
                presence_publisher,
                message_pusher,
            )),
        );

        AppState {
            hub: Arc::new(hub),
            get_messages_usecase: Arc::new(GetMessagesUseCase::new(self.store.clone())),
            offset,
        }
    }

    /// Bind to the configured address and serve until Ctrl+C / SIGTERM
    pub async fn run(self) -> Result<(), ServerError> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: bind_addr.clone(),
                source,
            })?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router().await?;

        tracing::info!("Chat hub listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

/// Build the CORS layer for the REST endpoints.
///
/// A fixed origin list also allows credentials; `*` cannot.
fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]);

    if allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(origins).allow_credentials(true)
}
