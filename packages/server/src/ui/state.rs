//! Shared application state.

use std::sync::Arc;

use chrono::FixedOffset;

use crate::usecase::{GetMessagesUseCase, SessionHub};

/// State shared by every handler
pub struct AppState {
    /// SessionHub（接続ごとのイベント処理）
    pub hub: Arc<SessionHub>,
    /// GetMessagesUseCase（REST の履歴取得）
    pub get_messages_usecase: Arc<GetMessagesUseCase>,
    /// 時刻表示に使うオフセット
    pub offset: FixedOffset,
}
