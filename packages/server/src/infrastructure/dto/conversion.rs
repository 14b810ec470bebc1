//! Conversion logic between DTOs and domain entities.

use chrono::FixedOffset;
use kaiwa_shared::time::{format_time_of_day, timestamp_to_rfc3339};

use crate::domain::{
    ChatMessage, MessageText, Notification, SessionEvent, StoredMessage, UserId, UserIdentity,
    UserName, ValueObjectError,
};
use crate::infrastructure::dto::{http, websocket as dto};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ClientFrame> for SessionEvent {
    type Error = ValueObjectError;

    fn try_from(frame: dto::ClientFrame) -> Result<Self, Self::Error> {
        let event = match frame {
            dto::ClientFrame::Announce { id, name } => {
                SessionEvent::Announce(UserIdentity::new(UserId::new(id)?, UserName::new(name)?))
            }
            dto::ClientFrame::ChatMessage { user, message } => SessionEvent::ChatMessage {
                user: UserName::new(user)?,
                message: MessageText::new(message)?,
            },
            dto::ClientFrame::Typing { user } => SessionEvent::Typing {
                user: UserName::new(user)?,
            },
            dto::ClientFrame::StopTyping => SessionEvent::StopTyping,
        };
        Ok(event)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<&UserIdentity> for dto::UserDto {
    fn from(identity: &UserIdentity) -> Self {
        Self {
            id: identity.id.as_str().to_string(),
            name: identity.name.as_str().to_string(),
        }
    }
}

impl dto::ChatMessageDto {
    /// Render a domain message with its timestamp as time-of-day in `offset`
    pub fn from_domain(message: &ChatMessage, offset: FixedOffset) -> Self {
        Self {
            user: message.user.as_str().to_string(),
            message: message.message.as_str().to_string(),
            timestamp: format_time_of_day(message.timestamp.value(), offset),
        }
    }
}

impl dto::ServerFrame {
    /// Build the wire frame for a notification
    pub fn from_notification(notification: &Notification, offset: FixedOffset) -> Self {
        match notification {
            Notification::ChatHistory(messages) => Self::ChatHistory {
                messages: messages
                    .iter()
                    .map(|m| dto::ChatMessageDto::from_domain(m, offset))
                    .collect(),
            },
            Notification::OnlineUsers(users) => Self::OnlineUsers {
                users: users.iter().map(dto::UserDto::from).collect(),
            },
            Notification::ChatMessage(message) => {
                Self::ChatMessage(dto::ChatMessageDto::from_domain(message, offset))
            }
            Notification::Typing { user } => Self::Typing {
                user: user.as_str().to_string(),
            },
            Notification::StopTyping => Self::StopTyping,
            Notification::DeliveryFailed { message, reason } => Self::DeliveryFailed {
                message: message.as_str().to_string(),
                reason: reason.clone(),
            },
        }
    }
}

impl http::PersistedMessageDto {
    pub fn from_stored(stored: &StoredMessage, offset: FixedOffset) -> Self {
        Self {
            user: stored.message.user.as_str().to_string(),
            message: stored.message.message.as_str().to_string(),
            timestamp: timestamp_to_rfc3339(stored.message.timestamp.value(), offset),
            created_at: timestamp_to_rfc3339(stored.created_at.value(), offset),
        }
    }
}
