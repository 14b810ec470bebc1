//! MessagePusher trait 定義
//!
//! セッションへの通知（送信）を抽象化します。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ChatMessage, MessagePushError, MessageText, SessionId, UserIdentity, UserName};

/// セッションへの送信チャンネル（シリアライズ済みのフレームを流す）
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// セッションへ送る通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// 接続直後に本人だけへ送る履歴（古い順）
    ChatHistory(Vec<ChatMessage>),
    /// オンラインユーザー一覧（参加順）
    OnlineUsers(Vec<UserIdentity>),
    /// チャットメッセージ
    ChatMessage(ChatMessage),
    /// 入力中
    Typing { user: UserName },
    /// 入力終了
    StopTyping,
    /// 永続化に失敗したため配信されなかったメッセージ（送信者のみ）
    DeliveryFailed { message: MessageText, reason: String },
}

/// メッセージ送信（通知）の抽象化
///
/// 送信先集合（fan-out set）は connect / disconnect でのみ変更され、
/// 各ブロードキャストはその時点の集合全体を一度のロックで参照する。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// セッションの送信チャンネルを登録
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel);

    /// セッションの送信チャンネルを登録解除。登録されていた場合は `true`
    async fn unregister_session(&self, session_id: &SessionId) -> bool;

    /// 特定のセッションにだけ送信
    async fn push_to(
        &self,
        session_id: &SessionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 全セッションに送信し、送信できたセッション数を返す
    async fn broadcast(&self, notification: &Notification) -> Result<usize, MessagePushError>;

    /// `origin` 以外の全セッションに送信し、送信できたセッション数を返す
    async fn broadcast_except(
        &self,
        origin: &SessionId,
        notification: &Notification,
    ) -> Result<usize, MessagePushError>;

    /// 登録中のセッション数
    async fn session_count(&self) -> usize;
}
