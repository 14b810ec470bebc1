//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::accept() / execute() メソッド
//! - サーバー時刻の付与、永続化、全員（送信者を含む）へのブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - 永続化に成功したメッセージだけが配信されることを保証
//! - 永続化に失敗した場合、送信者にだけ失敗通知が届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：永続化とブロードキャスト
//! - 異常系：ストア障害
//! - エッジケース：送信者が既に切断している

use std::sync::Arc;

use kaiwa_shared::time::Clock;

use crate::domain::{
    ChatMessage, MessagePusher, MessageStore, MessageText, Notification, SessionId, Timestamp,
    UserName,
};

use super::error::SendMessageError;

/// 受け付け済みで、永続化・配信待ちのメッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSubmission {
    /// 送信元セッション（失敗通知の宛先）
    pub origin: SessionId,
    pub message: ChatMessage,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// MessageStore（永続化の抽象化）
    store: Arc<dyn MessageStore>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    /// サーバー時刻
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        store: Arc<dyn MessageStore>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            message_pusher,
            clock,
        }
    }

    /// メッセージを受け付け、受信時点のサーバー時刻を付与する
    pub fn accept(&self, origin: SessionId, user: UserName, message: MessageText) -> ChatSubmission {
        let timestamp = Timestamp::new(self.clock.now_millis());
        ChatSubmission {
            origin,
            message: ChatMessage::new(user, message, timestamp),
        }
    }

    /// メッセージ送信を実行
    ///
    /// 1. ストアに永続化
    /// 2. 成功した場合のみ、送信者を含む全セッションにブロードキャスト
    ///
    /// 永続化に失敗した場合はブロードキャストせず、送信者にだけ `DeliveryFailed` を返す。
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - ブロードキャストが届いたセッション数
    /// * `Err(SendMessageError)` - 永続化失敗
    pub async fn execute(&self, submission: ChatSubmission) -> Result<usize, SendMessageError> {
        let ChatSubmission { origin, message } = submission;

        // 1. 永続化
        let stored = match self.store.append(message.clone()).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(
                    "Error saving message from '{}': {}",
                    message.user.as_str(),
                    e
                );
                self.notify_delivery_failed(&origin, message.message, &e.to_string())
                    .await;
                return Err(e.into());
            }
        };

        // 2. ブロードキャスト（送信者にもエコーする）
        let delivered = self
            .message_pusher
            .broadcast(&Notification::ChatMessage(stored.message))
            .await
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to broadcast chat message: {}", e);
                0
            });
        tracing::debug!(
            "Chat message from '{}' delivered to {} session(s)",
            message.user.as_str(),
            delivered
        );

        Ok(delivered)
    }

    async fn notify_delivery_failed(&self, origin: &SessionId, message: MessageText, reason: &str) {
        let notification = Notification::DeliveryFailed {
            message,
            reason: reason.to_string(),
        };
        if let Err(e) = self.message_pusher.push_to(origin, &notification).await {
            // 送信者が既に切断していれば届け先はない
            tracing::debug!("Could not report delivery failure to '{}': {}", origin, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::StoreError,
        infrastructure::store::InMemoryMessageStore,
        usecase::test_support::{Delivery, MockStore, RecordingPusher, connected_session},
    };
    use kaiwa_shared::time::FixedClock;

    const RECEIVED_AT: i64 = 1672553045000;

    fn create_usecase(
        store: Arc<dyn MessageStore>,
        pusher: Arc<RecordingPusher>,
    ) -> SendMessageUseCase {
        SendMessageUseCase::new(store, pusher, Arc::new(FixedClock::new(RECEIVED_AT)))
    }

    fn bob() -> UserName {
        UserName::new("Bob".to_string()).unwrap()
    }

    fn hi() -> MessageText {
        MessageText::new("hi".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_accept_assigns_server_time() {
        // テスト項目: 受け付け時にサーバー時刻が付与される
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let store = Arc::new(InMemoryMessageStore::new(Arc::new(FixedClock::new(0))));
        let usecase = create_usecase(store, pusher);
        let origin = SessionId::generate();

        // when (操作):
        let submission = usecase.accept(origin, bob(), hi());

        // then (期待する結果):
        assert_eq!(submission.origin, origin);
        assert_eq!(submission.message.timestamp, Timestamp::new(RECEIVED_AT));
    }

    #[tokio::test]
    async fn test_send_message_persists_then_echoes_to_all() {
        // テスト項目: 永続化後、送信者を含む全員にブロードキャストされる
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let _alice_session = connected_session(&pusher).await;
        let bob_session = connected_session(&pusher).await;
        let store = Arc::new(InMemoryMessageStore::new(Arc::new(FixedClock::new(0))));
        let usecase = create_usecase(store.clone(), pusher.clone());

        // when (操作):
        let submission = usecase.accept(bob_session, bob(), hi());
        let result = usecase.execute(submission.clone()).await;

        // then (期待する結果):
        assert_eq!(result, Ok(2));
        assert_eq!(store.len().await, 1);
        assert_eq!(
            pusher.sent().await,
            vec![(Delivery::All, Notification::ChatMessage(submission.message))]
        );
    }

    #[tokio::test]
    async fn test_persistence_failure_skips_broadcast() {
        // テスト項目: 永続化に失敗した場合、ブロードキャストは行われず送信者にだけ失敗通知が届く
        // given (前提条件):
        let mut store = MockStore::new();
        store
            .expect_append()
            .times(1)
            .returning(|_| Err(StoreError::Backend("write conflict".to_string())));
        let pusher = Arc::new(RecordingPusher::default());
        let bob_session = connected_session(&pusher).await;
        let _alice_session = connected_session(&pusher).await;
        let usecase = create_usecase(Arc::new(store), pusher.clone());

        // when (操作):
        let result = usecase
            .execute(usecase.accept(bob_session, bob(), hi()))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(SendMessageError::PersistenceFailed(StoreError::Backend(
                "write conflict".to_string()
            )))
        );
        let sent = pusher.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, Delivery::To(bob_session));
        assert!(matches!(sent[0].1, Notification::DeliveryFailed { .. }));
        assert!(
            !sent
                .iter()
                .any(|(_, n)| matches!(n, Notification::ChatMessage(_)))
        );
    }

    #[tokio::test]
    async fn test_message_from_departed_sender_still_broadcast() {
        // テスト項目: 送信者が切断済みでもメッセージは残りのセッションに届く
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let bob_session = connected_session(&pusher).await;
        let _alice_session = connected_session(&pusher).await;
        let store = Arc::new(InMemoryMessageStore::new(Arc::new(FixedClock::new(0))));
        let usecase = create_usecase(store, pusher.clone());
        let submission = usecase.accept(bob_session, bob(), hi());
        pusher.unregister_session(&bob_session).await;

        // when (操作):
        let result = usecase.execute(submission).await;

        // then (期待する結果):
        assert_eq!(result, Ok(1));
    }
}
