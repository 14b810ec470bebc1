//! InMemory MessageStore 実装
//!
//! ドメイン層が定義する MessageStore trait の具体的な実装。
//! Vec をインメモリ DB として使用し、`created_at` は注入された Clock から付与します。

use std::sync::Arc;

use async_trait::async_trait;
use kaiwa_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{ChatMessage, MessageStore, StoreError, StoredMessage, Timestamp};

/// インメモリ MessageStore 実装
pub struct InMemoryMessageStore {
    /// 永続化済みメッセージ（追加順）
    messages: Arc<Mutex<Vec<StoredMessage>>>,
    /// `created_at` の採番に使う時計
    clock: Arc<dyn Clock>,
}

impl InMemoryMessageStore {
    /// 新しい InMemoryMessageStore を作成
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            clock,
        }
    }

    /// 保存済みの件数
    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn append(&self, message: ChatMessage) -> Result<StoredMessage, StoreError> {
        let stored = StoredMessage::new(message, Timestamp::new(self.clock.now_millis()));
        let mut messages = self.messages.lock().await;
        messages.push(stored.clone());
        tracing::debug!("Stored message #{} from '{}'", messages.len(), stored.message.user.as_str());
        Ok(stored)
    }

    async fn recent(&self, limit: usize) -> Result<Vec<StoredMessage>, StoreError> {
        let mut messages = self.messages.lock().await.clone();
        // stable: equal timestamps keep arrival order
        messages.sort_by_key(|m| m.message.timestamp);
        let skip = messages.len().saturating_sub(limit);
        Ok(messages.split_off(skip))
    }

    async fn list_by_created_at(&self) -> Result<Vec<StoredMessage>, StoreError> {
        let mut messages = self.messages.lock().await.clone();
        messages.sort_by_key(|m| m.created_at);
        Ok(messages)
    }
}
