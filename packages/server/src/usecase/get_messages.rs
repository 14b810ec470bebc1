//! UseCase: 永続化済みメッセージ一覧の取得（REST 用）

use std::sync::Arc;

use crate::domain::{MessageStore, StoreError, StoredMessage};

/// メッセージ一覧取得のユースケース
pub struct GetMessagesUseCase {
    store: Arc<dyn MessageStore>,
}

impl GetMessagesUseCase {
    pub fn new(store: Arc<dyn MessageStore>) -> Self {
        Self { store }
    }

    /// 全件を `created_at` の昇順で取得
    pub async fn execute(&self) -> Result<Vec<StoredMessage>, StoreError> {
        self.store.list_by_created_at().await
    }
}
