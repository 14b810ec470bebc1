//! UseCase layer: one use case per hub operation, orchestrated by [`SessionHub`].

mod announce_presence;
mod chat_dispatcher;
mod disconnect_session;
mod error;
mod get_messages;
mod presence_publisher;
mod relay_typing;
mod replay_history;
mod send_message;
mod session_hub;

pub use announce_presence::AnnouncePresenceUseCase;
pub use chat_dispatcher::ChatDispatcher;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::SendMessageError;
pub use get_messages::GetMessagesUseCase;
pub use presence_publisher::PresencePublisher;
pub use relay_typing::RelayTypingUseCase;
pub use replay_history::{DEFAULT_HISTORY_LIMIT, MAX_HISTORY_LIMIT, ReplayHistoryUseCase};
pub use send_message::{ChatSubmission, SendMessageUseCase};
pub use session_hub::SessionHub;

#[cfg(test)]
pub(crate) mod test_support;
