//! オンライン一覧の更新と通知
//!
//! 登録・削除と `onlineUsers` の送信を 1 つの臨界区間で行う。
//! 全セッションが受け取る一覧の順序は更新順と一致し、最後に届く一覧は
//! 常にレジストリの現在の内容と等しい。

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{MessagePusher, Notification, PresenceRepository, SessionId, UserIdentity};

/// オンライン一覧の更新を直列化し、更新ごとに全セッションへ通知する
pub struct PresencePublisher {
    presence: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    /// 更新から送信までを保護する
    publish_lock: Mutex<()>,
}

impl PresencePublisher {
    /// 新しい PresencePublisher を作成
    pub fn new(
        presence: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            presence,
            message_pusher,
            publish_lock: Mutex::new(()),
        }
    }

    /// 登録（または上書き）して通知し、更新後の一覧を返す
    pub async fn register(
        &self,
        session_id: SessionId,
        identity: UserIdentity,
    ) -> Vec<UserIdentity> {
        let _guard = self.publish_lock.lock().await;
        let snapshot = self.presence.register(session_id, identity).await;
        self.publish(&snapshot).await;
        snapshot
    }

    /// 削除して通知し、更新後の一覧を返す（未登録でも通知する）
    pub async fn unregister(&self, session_id: &SessionId) -> Vec<UserIdentity> {
        let _guard = self.publish_lock.lock().await;
        let snapshot = self.presence.unregister(session_id).await;
        self.publish(&snapshot).await;
        snapshot
    }

    async fn publish(&self, snapshot: &[UserIdentity]) {
        if let Err(e) = self
            .message_pusher
            .broadcast(&Notification::OnlineUsers(snapshot.to_vec()))
            .await
        {
            tracing::warn!("Failed to broadcast online users: {}", e);
        }
    }
}
