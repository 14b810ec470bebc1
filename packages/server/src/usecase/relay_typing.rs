//! UseCase: 入力中シグナルの中継
//!
//! 送信元以外の全セッションへ中継するだけで、永続化・間引きは行わない。

use std::sync::Arc;

use crate::domain::{MessagePusher, Notification, SessionId, UserName};

/// 入力中シグナル中継のユースケース
pub struct RelayTypingUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayTypingUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// `typing` を送信元以外へ中継
    pub async fn typing(&self, origin: &SessionId, user: UserName) -> usize {
        self.relay(origin, Notification::Typing { user }).await
    }

    /// `stopTyping` を送信元以外へ中継
    pub async fn stop_typing(&self, origin: &SessionId) -> usize {
        self.relay(origin, Notification::StopTyping).await
    }

    async fn relay(&self, origin: &SessionId, notification: Notification) -> usize {
        match self
            .message_pusher
            .broadcast_except(origin, &notification)
            .await
        {
            Ok(delivered) => delivered,
            Err(e) => {
                tracing::warn!("Failed to relay typing signal from '{}': {}", origin, e);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecase::test_support::{Delivery, RecordingPusher, connected_session};

    #[tokio::test]
    async fn test_typing_excludes_origin() {
        // テスト項目: typing は送信元を除いて中継される
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let alice_session = connected_session(&pusher).await;
        let _bob_session = connected_session(&pusher).await;
        let usecase = RelayTypingUseCase::new(pusher.clone());

        // when (操作):
        let delivered = usecase
            .typing(&alice_session, UserName::new("Alice".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(delivered, 1);
        assert_eq!(
            pusher.sent().await,
            vec![(
                Delivery::AllExcept(alice_session),
                Notification::Typing {
                    user: UserName::new("Alice".to_string()).unwrap()
                }
            )]
        );
    }

    #[tokio::test]
    async fn test_stop_typing_excludes_origin() {
        // テスト項目: stopTyping も送信元を除いて中継される
        // given (前提条件):
        let pusher = Arc::new(RecordingPusher::default());
        let alice_session = connected_session(&pusher).await;
        let usecase = RelayTypingUseCase::new(pusher.clone());

        // when (操作):
        usecase.stop_typing(&alice_session).await;

        // then (期待する結果):
        assert_eq!(
            pusher.sent().await,
            vec![(Delivery::AllExcept(alice_session), Notification::StopTyping)]
        );
    }
}
