//! メッセージ送信（通知）の実装
//!
//! ## 実装
//!
//! - `websocket`: WebSocket セッションの送信チャンネルを使った実装

pub mod websocket;

pub use websocket::WebSocketMessagePusher;
