//! UseCase: 履歴再送処理
//!
//! 接続直後のセッションにだけ、直近の履歴を古い順で 1 回送信する。
//! ストアからの取得に失敗した場合は履歴を送らない（接続自体は継続）。

use std::sync::Arc;

use crate::domain::{MessagePusher, MessageStore, Notification, SessionId};

/// 接続時に再送する履歴の上限件数
pub const MAX_HISTORY_LIMIT: usize = 50;

/// 接続時に再送する履歴の既定件数
pub const DEFAULT_HISTORY_LIMIT: usize = MAX_HISTORY_LIMIT;

/// 履歴再送のユースケース
pub struct ReplayHistoryUseCase {
    store: Arc<dyn MessageStore>,
    message_pusher: Arc<dyn MessagePusher>,
    limit: usize,
}

impl ReplayHistoryUseCase {
    /// 新しい ReplayHistoryUseCase を作成
    ///
    /// `limit` は [`MAX_HISTORY_LIMIT`] までに切り詰められる。
    pub fn new(
        store: Arc<dyn MessageStore>,
        message_pusher: Arc<dyn MessagePusher>,
        limit: usize,
    ) -> Self {
        Self {
            store,
            message_pusher,
            limit: limit.min(MAX_HISTORY_LIMIT),
        }
    }

    /// 履歴再送を実行
    ///
    /// # Returns
    ///
    /// 送信した履歴の件数（取得・送信に失敗した場合は `None`）
    pub async fn execute(&self, session_id: &SessionId) -> Option<usize> {
        let stored = match self.store.recent(self.limit).await {
            Ok(stored) => stored,
            Err(e) => {
                tracing::warn!("Error loading chat history for '{}': {}", session_id, e);
                return None;
            }
        };

        let messages: Vec<_> = stored.into_iter().map(|s| s.message).collect();
        let count = messages.len();

        match self
            .message_pusher
            .push_to(session_id, &Notification::ChatHistory(messages))
            .await
        {
            Ok(()) => {
                tracing::debug!("Replayed {} message(s) to '{}'", count, session_id);
                Some(count)
            }
            Err(e) => {
                tracing::warn!("Failed to replay chat history to '{}': {}", session_id, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{ChatMessage, MessageText, StoreError, StoredMessage, Timestamp, UserName},
        infrastructure::store::InMemoryMessageStore,
        usecase::test_support::{Delivery, MockStore, RecordingPusher, connected_session},
    };
    use kaiwa_shared::time::FixedClock;

    fn message(text: &str, timestamp: i64) -> ChatMessage {
        ChatMessage::new(
            UserName::new("Alice".to_string()).unwrap(),
            MessageText::new(text.to_string()).unwrap(),
            Timestamp::new(timestamp),
        )
    }

    #[tokio::test]
    async fn test_replay_latest_fifty_oldest_first() {
        // テスト項目: 60 件保存済みなら直近 50 件が古い順で本人にだけ届く
        // given (前提条件):
        let store = Arc::new(InMemoryMessageStore::new(Arc::new(FixedClock::new(0))));
        for i in 0..60 {
            store.append(message(&format!("m{}", i), i)).await.unwrap();
        }
        let pusher = Arc::new(RecordingPusher::default());
        let session_id = connected_session(&pusher).await;
        let usecase = ReplayHistoryUseCase::new(store, pusher.clone(), DEFAULT_HISTORY_LIMIT);

        // when (操作):
        let result = usecase.execute(&session_id).await;

        // then (期待する結果):
        assert_eq!(result, Some(50));
        let sent = pusher.sent().await;
        assert_eq!(sent.len(), 1);
        let (delivery, Notification::ChatHistory(history)) = &sent[0] else {
            panic!("expected chat history");
        };
        assert_eq!(delivery, &Delivery::To(session_id));
        assert_eq!(history.first().unwrap().message.as_str(), "m10");
        assert_eq!(history.last().unwrap().message.as_str(), "m59");
    }

    #[tokio::test]
    async fn test_replay_empty_history() {
        // テスト項目: 履歴が空でも空のリストが本人に送られる
        // given (前提条件):
        let store = Arc::new(InMemoryMessageStore::new(Arc::new(FixedClock::new(0))));
        let pusher = Arc::new(RecordingPusher::default());
        let session_id = connected_session(&pusher).await;
        let usecase = ReplayHistoryUseCase::new(store, pusher.clone(), DEFAULT_HISTORY_LIMIT);

        // when (操作):
        let result = usecase.execute(&session_id).await;

        // then (期待する結果):
        assert_eq!(result, Some(0));
        assert_eq!(
            pusher.sent().await,
            vec![(Delivery::To(session_id), Notification::ChatHistory(vec![]))]
        );
    }

    #[tokio::test]
    async fn test_store_failure_sends_no_history() {
        // テスト項目: ストア障害時は履歴を一切送らない
        // given (前提条件):
        let mut store = MockStore::new();
        store
            .expect_recent()
            .withf(|limit| *limit == DEFAULT_HISTORY_LIMIT)
            .times(1)
            .returning(|_| Err(StoreError::Unavailable("connection refused".to_string())));
        let pusher = Arc::new(RecordingPusher::default());
        let session_id = connected_session(&pusher).await;
        let usecase =
            ReplayHistoryUseCase::new(Arc::new(store), pusher.clone(), DEFAULT_HISTORY_LIMIT);

        // when (操作):
        let result = usecase.execute(&session_id).await;

        // then (期待する結果):
        assert_eq!(result, None);
        assert!(pusher.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_replay_uses_configured_limit() {
        // テスト項目: 設定された件数でストアに問い合わせる
        // given (前提条件):
        let mut store = MockStore::new();
        store
            .expect_recent()
            .withf(|limit| *limit == 5)
            .times(1)
            .returning(|_| Ok(vec![StoredMessage::new(message("only", 1), Timestamp::new(1))]));
        let pusher = Arc::new(RecordingPusher::default());
        let session_id = connected_session(&pusher).await;
        let usecase = ReplayHistoryUseCase::new(Arc::new(store), pusher.clone(), 5);

        // when (操作):
        let result = usecase.execute(&session_id).await;

        // then (期待する結果):
        assert_eq!(result, Some(1));
    }

    #[tokio::test]
    async fn test_limit_above_maximum_is_capped() {
        // テスト項目: 上限を超える件数が指定されても 50 件までしか送らない
        // given (前提条件):
        let store = Arc::new(InMemoryMessageStore::new(Arc::new(FixedClock::new(0))));
        for i in 0..60 {
            store.append(message(&format!("m{}", i), i)).await.unwrap();
        }
        let pusher = Arc::new(RecordingPusher::default());
        let session_id = connected_session(&pusher).await;
        let usecase = ReplayHistoryUseCase::new(store, pusher.clone(), 100);

        // when (操作):
        let result = usecase.execute(&session_id).await;

        // then (期待する結果):
        assert_eq!(result, Some(MAX_HISTORY_LIMIT));
    }
}
