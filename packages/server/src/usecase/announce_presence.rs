//! UseCase: オンライン登録処理
//!
//! セッションに ID を紐づけ、更新後のオンライン一覧を全セッション（本人を含む）へ通知する。

use std::sync::Arc;

use crate::domain::{SessionId, UserIdentity};

use super::PresencePublisher;

/// オンライン登録のユースケース
pub struct AnnouncePresenceUseCase {
    publisher: Arc<PresencePublisher>,
}

impl AnnouncePresenceUseCase {
    /// 新しい AnnouncePresenceUseCase を作成
    pub fn new(publisher: Arc<PresencePublisher>) -> Self {
        Self { publisher }
    }

    /// オンライン登録を実行
    ///
    /// 同じセッションで再度呼ばれた場合は上書きされる。
    ///
    /// # Returns
    ///
    /// 更新後のオンライン一覧（参加順）
    pub async fn execute(
        &self,
        session_id: SessionId,
        identity: UserIdentity,
    ) -> Vec<UserIdentity> {
        let name = identity.name.as_str().to_string();
        let snapshot = self.publisher.register(session_id, identity).await;
        tracing::info!(
            "'{}' is online on session '{}' ({} online)",
            name,
            session_id,
            snapshot.len()
        );
        snapshot
    }
}
