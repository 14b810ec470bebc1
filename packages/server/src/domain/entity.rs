//! Entities.

use super::{MessageText, Timestamp, UserId, UserName};

/// Verified user identity supplied by the identity provider.
///
/// The hub never mutates it; an announce simply binds it to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: UserId,
    pub name: UserName,
}

impl UserIdentity {
    pub fn new(id: UserId, name: UserName) -> Self {
        Self { id, name }
    }
}

/// A chat message accepted by the hub.
///
/// `timestamp` is assigned by the server on receipt, never taken from the sender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub user: UserName,
    pub message: MessageText,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(user: UserName, message: MessageText, timestamp: Timestamp) -> Self {
        Self {
            user,
            message,
            timestamp,
        }
    }
}

/// A chat message as persisted by the message store.
///
/// `created_at` is assigned by the store and is a distinct field from the
/// message's own `timestamp`: the live replay path orders by `timestamp`,
/// the REST read path orders by `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredMessage {
    pub message: ChatMessage,
    pub created_at: Timestamp,
}

impl StoredMessage {
    pub fn new(message: ChatMessage, created_at: Timestamp) -> Self {
        Self {
            message,
            created_at,
        }
    }
}
