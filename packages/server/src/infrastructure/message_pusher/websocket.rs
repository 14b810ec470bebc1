//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - セッションごとの `UnboundedSender` を管理（fan-out set）
//! - 通知を JSON フレームに変換し、セッションへ送信（push_to, broadcast, broadcast_except）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 通知は送信先の数に関係なく 1 回だけシリアライズされます。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::FixedOffset;
use tokio::sync::Mutex;

use crate::{
    domain::{MessagePushError, MessagePusher, Notification, PusherChannel, SessionId},
    infrastructure::dto::websocket::ServerFrame,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `sessions`: 接続中のセッションと対応する WebSocket sender のマップ
/// - `offset`: 時刻文字列を描画するタイムゾーン
pub struct WebSocketMessagePusher {
    sessions: Arc<Mutex<HashMap<SessionId, PusherChannel>>>,
    offset: FixedOffset,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(sessions: Arc<Mutex<HashMap<SessionId, PusherChannel>>>, offset: FixedOffset) -> Self {
        Self { sessions, offset }
    }

    fn encode(&self, notification: &Notification) -> Result<String, MessagePushError> {
        let frame = ServerFrame::from_notification(notification, self.offset);
        serde_json::to_string(&frame).map_err(|e| MessagePushError::EncodeFailed(e.to_string()))
    }

    /// `skip` 以外の全セッションに送信する。
    /// ブロードキャストでは一部の送信失敗を許容する。
    async fn fan_out(
        &self,
        skip: Option<&SessionId>,
        notification: &Notification,
    ) -> Result<usize, MessagePushError> {
        let content = self.encode(notification)?;
        let sessions = self.sessions.lock().await;

        let mut delivered = 0;
        for (session_id, sender) in sessions.iter() {
            if Some(session_id) == skip {
                continue;
            }
            if let Err(e) = sender.send(content.clone()) {
                tracing::warn!("Failed to push message to session '{}': {}", session_id, e);
            } else {
                delivered += 1;
            }
        }

        tracing::debug!("Broadcasted frame to {} session(s)", delivered);
        Ok(delivered)
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel) {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id, sender);
        tracing::debug!("Session '{}' registered to MessagePusher", session_id);
    }

    async fn unregister_session(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock().await;
        let removed = sessions.remove(session_id).is_some();
        if removed {
            tracing::debug!("Session '{}' unregistered from MessagePusher", session_id);
        }
        removed
    }

    async fn push_to(
        &self,
        session_id: &SessionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = self.encode(notification)?;
        let sessions = self.sessions.lock().await;

        let sender = sessions
            .get(session_id)
            .ok_or_else(|| MessagePushError::SessionNotFound(session_id.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to session '{}'", session_id);
        Ok(())
    }

    async fn broadcast(&self, notification: &Notification) -> Result<usize, MessagePushError> {
        self.fan_out(None, notification).await
    }

    async fn broadcast_except(
        &self,
        origin: &SessionId,
        notification: &Notification,
    ) -> Result<usize, MessagePushError> {
        self.fan_out(Some(origin), notification).await
    }

    async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
