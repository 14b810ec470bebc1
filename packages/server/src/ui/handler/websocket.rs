//! WebSocket connection handlers.
//!
//! The transport adapter for the hub: each socket becomes one session, each text
//! frame one [`SessionEvent`], and socket close the `disconnect` event.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, SplitStream, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{Session, SessionEvent},
    infrastructure::dto::websocket::ClientFrame,
    ui::state::AppState,
    usecase::SessionHub,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound flow: frames produced by the hub (via rx channel)
/// are written to this client's WebSocket connection.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    // Outbound channel for this session; the hub only ever sees the sender half
    let (tx, rx) = mpsc::unbounded_channel();
    let mut session = state.hub.connect(tx).await;
    let session_id = session.id();
    let mut send_task = pusher_loop(rx, sender);

    // If either side completes, the session is over
    tokio::select! {
        _ = read_loop(&mut receiver, &state.hub, &mut session) => send_task.abort(),
        _ = &mut send_task => {
            tracing::debug!("Outbound stream closed for '{}'", session_id);
        }
    };

    state.hub.disconnect(&mut session).await;
}

/// Read inbound frames and dispatch them until the client goes away
async fn read_loop(
    receiver: &mut SplitStream<WebSocket>,
    hub: &SessionHub,
    session: &mut Session,
) {
    while let Some(msg) = receiver.next().await {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("WebSocket error on '{}': {}", session.id(), e);
                break;
            }
        };

        match msg {
            Message::Text(text) => {
                tracing::debug!("Received frame on '{}': {}", session.id(), text.as_str());
                if let Some(event) = parse_frame(text.as_str()) {
                    hub.handle(session, event).await;
                }
            }
            Message::Binary(data) => {
                tracing::warn!(
                    "Discarding binary frame ({} bytes) on '{}'",
                    data.len(),
                    session.id()
                );
            }
            Message::Close(_) => {
                tracing::info!("Session '{}' requested close", session.id());
                break;
            }
            // Ping/pong is handled automatically by the WebSocket protocol
            Message::Ping(_) | Message::Pong(_) => {}
        }
    }
}

/// Parse and validate one text frame; malformed frames are logged and dropped
fn parse_frame(text: &str) -> Option<SessionEvent> {
    let frame = match serde_json::from_str::<ClientFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("Discarding malformed frame: {}", e);
            return None;
        }
    };

    match SessionEvent::try_from(frame) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Discarding invalid frame: {}", e);
            None
        }
    }
}
