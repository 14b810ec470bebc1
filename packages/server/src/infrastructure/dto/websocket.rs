//! WebSocket frame DTOs.
//!
//! Every text frame carries exactly one JSON object with a `type` discriminator.

use serde::{Deserialize, Serialize};

/// Frames sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientFrame {
    /// Identity handed over by the identity provider
    Announce { id: String, name: String },
    ChatMessage { user: String, message: String },
    Typing { user: String },
    StopTyping,
}

/// Frames sent by the hub
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerFrame {
    /// Unicast to a freshly connected session, oldest first
    ChatHistory { messages: Vec<ChatMessageDto> },
    /// Broadcast on every presence change, join order
    OnlineUsers { users: Vec<UserDto> },
    /// Broadcast to every session including the sender
    ChatMessage(ChatMessageDto),
    /// Relayed to every session except the originator
    Typing { user: String },
    StopTyping,
    /// Sent to the submitting session only when persistence failed
    DeliveryFailed { message: String, reason: String },
}

/// Chat message as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub user: String,
    pub message: String,
    /// Short time-of-day string, e.g. `3:04:05 PM`
    pub timestamp: String,
}

/// Online user entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub name: String,
}
