//! Per-connection lifecycle state machine.
//!
//! - `Connected`: transport open, no identity yet
//! - `Announced`: identity bound and registered in presence; a further
//!   announce overwrites the identity
//! - `Closed`: transport gone, reachable from either state
//!
//! `Closed` is terminal: every event received afterwards is dropped.

use super::{MessageText, SessionId, UserIdentity, UserName};

/// Lifecycle state of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Transport open, no identity announced yet
    Connected,
    /// Identity bound and registered in presence
    Announced(UserIdentity),
    /// Transport gone
    Closed,
}

/// Inbound events driving a session, already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Announce(UserIdentity),
    ChatMessage { user: UserName, message: MessageText },
    Typing { user: UserName },
    StopTyping,
    Disconnect,
}

impl SessionEvent {
    /// Short event name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Announce(_) => "announce",
            Self::ChatMessage { .. } => "chatMessage",
            Self::Typing { .. } => "typing",
            Self::StopTyping => "stopTyping",
            Self::Disconnect => "disconnect",
        }
    }
}

/// One live transport connection and its lifecycle state
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    state: SessionState,
}

impl Session {
    /// Start a session in the `Connected` state
    pub fn connect(id: SessionId) -> Self {
        Self {
            id,
            state: SessionState::Connected,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.state, SessionState::Closed)
    }

    /// Identity bound by the latest announce, if any
    pub fn identity(&self) -> Option<&UserIdentity> {
        match &self.state {
            SessionState::Announced(identity) => Some(identity),
            _ => None,
        }
    }

    /// Apply `event` to the lifecycle.
    ///
    /// Returns the event back when the hub must act on it, or `None` when the
    /// session is already closed and the event is dropped.
    pub fn accept(&mut self, event: SessionEvent) -> Option<SessionEvent> {
        if self.is_closed() {
            return None;
        }

        match &event {
            SessionEvent::Announce(identity) => {
                self.state = SessionState::Announced(identity.clone());
            }
            SessionEvent::Disconnect => {
                self.state = SessionState::Closed;
            }
            // chat and typing are accepted from Connected too; no state change
            SessionEvent::ChatMessage { .. }
            | SessionEvent::Typing { .. }
            | SessionEvent::StopTyping => {}
        }

        Some(event)
    }
}
