//! Request handlers.

mod http;
mod websocket;

pub use http::{get_messages, health_check};
pub use websocket::websocket_handler;
