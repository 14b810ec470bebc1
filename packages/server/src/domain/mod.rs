//! Domain layer for the chat session hub.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs), transports and storage backends.

pub mod entity;
pub mod error;
pub mod message_pusher;
pub mod presence;
pub mod repository;
pub mod session;
pub mod value_object;

pub use entity::{ChatMessage, StoredMessage, UserIdentity};
pub use error::{MessagePushError, StoreError, ValueObjectError};
pub use message_pusher::{MessagePusher, Notification, PusherChannel};
pub use presence::PresenceRegistry;
pub use repository::{MessageStore, PresenceRepository};
pub use session::{Session, SessionEvent, SessionState};
pub use value_object::{MessageText, SessionId, Timestamp, UserId, UserName};
