//! UseCase: セッション切断処理
//!
//! 送信チャンネルとオンライン一覧からセッションを取り除き、
//! 残りの全セッションへ更新後のオンライン一覧を通知する。

use std::sync::Arc;

use crate::domain::{MessagePusher, SessionId, UserIdentity};

use super::PresencePublisher;

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    publisher: Arc<PresencePublisher>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
    pub fn new(publisher: Arc<PresencePublisher>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            publisher,
            message_pusher,
        }
    }

    /// セッション切断を実行
    ///
    /// 既に切断済み（送信チャンネルが登録されていない）の場合は何もしない。
    ///
    /// # Returns
    ///
    /// * `Some(Vec<UserIdentity>)` - 切断後のオンライン一覧
    /// * `None` - 未接続のセッションだった（no-op）
    pub async fn execute(&self, session_id: &SessionId) -> Option<Vec<UserIdentity>> {
        // 1. 送信チャンネルを先に外し、自分宛ての通知を止める
        if !self.message_pusher.unregister_session(session_id).await {
            tracing::debug!("Session '{}' already disconnected", session_id);
            return None;
        }

        // 2. オンライン一覧から削除し、残りのセッションに通知（未登録でも可）
        let snapshot = self.publisher.unregister(session_id).await;
        tracing::info!(
            "Session '{}' disconnected ({} online)",
            session_id,
            snapshot.len()
        );

        Some(snapshot)
    }
}
