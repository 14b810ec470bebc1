//! InMemory PresenceRepository 実装
//!
//! PresenceRegistry を Mutex で保護し、登録・削除を直列化します。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{PresenceRegistry, PresenceRepository, SessionId, UserIdentity};

/// インメモリ PresenceRepository 実装
pub struct InMemoryPresenceRepository {
    registry: Arc<Mutex<PresenceRegistry>>,
}

impl InMemoryPresenceRepository {
    pub fn new(registry: Arc<Mutex<PresenceRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemoryPresenceRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(PresenceRegistry::new())))
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn register(&self, session_id: SessionId, identity: UserIdentity) -> Vec<UserIdentity> {
        let mut registry = self.registry.lock().await;
        registry.register(session_id, identity)
    }

    async fn unregister(&self, session_id: &SessionId) -> Vec<UserIdentity> {
        let mut registry = self.registry.lock().await;
        registry.unregister(session_id)
    }

    async fn snapshot(&self) -> Vec<UserIdentity> {
        self.registry.lock().await.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{UserId, UserName};

    fn identity(id: &str, name: &str) -> UserIdentity {
        UserIdentity::new(
            UserId::new(id.to_string()).unwrap(),
            UserName::new(name.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_concurrent_registrations_keep_one_entry_per_session() {
        // テスト項目: 並行に登録・削除してもセッションごとに高々 1 件
        // given (前提条件):
        let repo = Arc::new(InMemoryPresenceRepository::default());
        let sessions: Vec<SessionId> = (0..20).map(|_| SessionId::generate()).collect();

        // when (操作): 各セッションを 2 回ずつ並行登録し、偶数番目を削除
        let mut handles = Vec::new();
        for (i, session_id) in sessions.iter().copied().enumerate() {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.register(session_id, identity(&i.to_string(), "User")).await;
                repo.register(session_id, identity(&i.to_string(), "User")).await;
                if i % 2 == 0 {
                    repo.unregister(&session_id).await;
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // then (期待する結果):
        assert_eq!(repo.snapshot().await.len(), 10);
    }

    #[tokio::test]
    async fn test_unregister_unknown_session() {
        // テスト項目: 未登録セッションの削除はエラーにならない
        // given (前提条件):
        let repo = InMemoryPresenceRepository::default();
        repo.register(SessionId::generate(), identity("1", "Alice")).await;

        // when (操作):
        let snapshot = repo.unregister(&SessionId::generate()).await;

        // then (期待する結果):
        assert_eq!(snapshot.len(), 1);
    }
}
