//! SessionHub: per-connection orchestration.
//!
//! Drives each [`Session`] through its lifecycle and routes accepted events to
//! the use case that owns them:
//!
//! | event         | handled by                  |
//! |---------------|-----------------------------|
//! | connect       | `ReplayHistoryUseCase`      |
//! | announce      | `AnnouncePresenceUseCase`   |
//! | chatMessage   | `ChatDispatcher`            |
//! | typing / stop | `RelayTypingUseCase`        |
//! | disconnect    | `DisconnectSessionUseCase`  |

use std::sync::Arc;

use crate::domain::{MessagePusher, PusherChannel, Session, SessionEvent, SessionId};

use super::{
    AnnouncePresenceUseCase, ChatDispatcher, DisconnectSessionUseCase, RelayTypingUseCase,
    ReplayHistoryUseCase,
};

/// Chat session hub
pub struct SessionHub {
    message_pusher: Arc<dyn MessagePusher>,
    replay_history: Arc<ReplayHistoryUseCase>,
    announce_presence: Arc<AnnouncePresenceUseCase>,
    chat_dispatcher: ChatDispatcher,
    relay_typing: Arc<RelayTypingUseCase>,
    disconnect_session: Arc<DisconnectSessionUseCase>,
}

impl SessionHub {
    pub fn new(
        message_pusher: Arc<dyn MessagePusher>,
        replay_history: Arc<ReplayHistoryUseCase>,
        announce_presence: Arc<AnnouncePresenceUseCase>,
        chat_dispatcher: ChatDispatcher,
        relay_typing: Arc<RelayTypingUseCase>,
        disconnect_session: Arc<DisconnectSessionUseCase>,
    ) -> Self {
        Self {
            message_pusher,
            replay_history,
            announce_presence,
            chat_dispatcher,
            relay_typing,
            disconnect_session,
        }
    }

    /// Open a session for a new transport connection.
    ///
    /// The outbound channel joins the fan-out set, then recent history is
    /// replayed to this session only. The replay runs in its own task, so a
    /// slow store never holds back the session's inbound events.
    pub async fn connect(&self, sender: PusherChannel) -> Session {
        let session = Session::connect(SessionId::generate());
        let session_id = session.id();
        self.message_pusher.register_session(session_id, sender).await;
        tracing::info!("New session connected: '{}'", session_id);

        let replay_history = self.replay_history.clone();
        tokio::spawn(async move {
            replay_history.execute(&session_id).await;
        });
        session
    }

    /// Apply one inbound event to `session`
    pub async fn handle(&self, session: &mut Session, event: SessionEvent) {
        let kind = event.kind();
        let Some(event) = session.accept(event) else {
            tracing::debug!("Dropping '{}' for closed session '{}'", kind, session.id());
            return;
        };
        let session_id = session.id();

        match event {
            SessionEvent::Announce(identity) => {
                self.announce_presence.execute(session_id, identity).await;
            }
            SessionEvent::ChatMessage { user, message } => {
                if let Err(e) = self.chat_dispatcher.submit(session_id, user, message) {
                    tracing::error!("Cannot accept chat message from '{}': {}", session_id, e);
                }
            }
            SessionEvent::Typing { user } => {
                self.relay_typing.typing(&session_id, user).await;
            }
            SessionEvent::StopTyping => {
                self.relay_typing.stop_typing(&session_id).await;
            }
            SessionEvent::Disconnect => {
                self.disconnect_session.execute(&session_id).await;
            }
        }
    }

    /// Close `session`. Safe to call more than once.
    pub async fn disconnect(&self, session: &mut Session) {
        if let Some(identity) = session.identity() {
            tracing::info!(
                "'{}' is leaving session '{}'",
                identity.name.as_str(),
                session.id()
            );
        }
        self.handle(session, SessionEvent::Disconnect).await;
    }
}
