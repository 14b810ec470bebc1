//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ChatMessage, SessionId, StoredMessage, StoreError, UserIdentity};

/// 永続化ストア trait
///
/// ハブが呼び出すのは `append` と `recent` の 2 操作のみ。
/// `list_by_created_at` は REST の履歴取得、`ping` は起動時の疎通確認で使用する。
///
/// ## 並び順
///
/// - `recent`: メッセージ自身の `timestamp` 昇順（ライブの履歴再送用）
/// - `list_by_created_at`: ストアが付与した `created_at` 昇順（REST 用）
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// ストアへの疎通確認
    async fn ping(&self) -> Result<(), StoreError>;

    /// メッセージを 1 件永続化し、`created_at` を付与したレコードを返す
    async fn append(&self, message: ChatMessage) -> Result<StoredMessage, StoreError>;

    /// 直近 `limit` 件を古い順で取得
    async fn recent(&self, limit: usize) -> Result<Vec<StoredMessage>, StoreError>;

    /// 全件を `created_at` の昇順で取得
    async fn list_by_created_at(&self) -> Result<Vec<StoredMessage>, StoreError>;
}

/// オンライン状態 Repository trait
///
/// [`PresenceRegistry`](super::PresenceRegistry) への排他的なアクセスを提供する。
/// 接続ごとのワーカーは共有可変状態に直接触れず、この trait 経由でのみ操作する。
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// セッションに ID を紐づけ（上書き可）、更新後のスナップショットを返す
    async fn register(&self, session_id: SessionId, identity: UserIdentity) -> Vec<UserIdentity>;

    /// セッションを削除し（存在しなければ何もしない）、更新後のスナップショットを返す
    async fn unregister(&self, session_id: &SessionId) -> Vec<UserIdentity>;

    /// 現在のスナップショット（参加順）
    async fn snapshot(&self) -> Vec<UserIdentity>;
}
