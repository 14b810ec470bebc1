//! Test doubles shared by the use case tests.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::{Mutex, Notify, mpsc};

use crate::domain::{
    ChatMessage, MessagePushError, MessagePusher, MessageStore, Notification, PusherChannel,
    SessionId, StoreError, StoredMessage, UserId, UserIdentity, UserName,
};

mock! {
    pub Store {}

    #[async_trait]
    impl MessageStore for Store {
        async fn ping(&self) -> Result<(), StoreError>;
        async fn append(&self, message: ChatMessage) -> Result<StoredMessage, StoreError>;
        async fn recent(&self, limit: usize) -> Result<Vec<StoredMessage>, StoreError>;
        async fn list_by_created_at(&self) -> Result<Vec<StoredMessage>, StoreError>;
    }
}

/// Where a recorded notification was sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    To(SessionId),
    All,
    AllExcept(SessionId),
}

/// MessagePusher that records every call instead of sending
#[derive(Default)]
pub struct RecordingPusher {
    pub sent: Mutex<Vec<(Delivery, Notification)>>,
    pub sessions: Mutex<Vec<SessionId>>,
}

impl RecordingPusher {
    pub async fn sent(&self) -> Vec<(Delivery, Notification)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl MessagePusher for RecordingPusher {
    async fn register_session(&self, session_id: SessionId, _sender: PusherChannel) {
        self.sessions.lock().await.push(session_id);
    }

    async fn unregister_session(&self, session_id: &SessionId) -> bool {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|id| id != session_id);
        sessions.len() != before
    }

    async fn push_to(
        &self,
        session_id: &SessionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        if !self.sessions.lock().await.contains(session_id) {
            return Err(MessagePushError::SessionNotFound(session_id.to_string()));
        }
        self.sent
            .lock()
            .await
            .push((Delivery::To(*session_id), notification.clone()));
        Ok(())
    }

    async fn broadcast(&self, notification: &Notification) -> Result<usize, MessagePushError> {
        self.sent
            .lock()
            .await
            .push((Delivery::All, notification.clone()));
        Ok(self.sessions.lock().await.len())
    }

    async fn broadcast_except(
        &self,
        origin: &SessionId,
        notification: &Notification,
    ) -> Result<usize, MessagePushError> {
        self.sent
            .lock()
            .await
            .push((Delivery::AllExcept(*origin), notification.clone()));
        Ok(self.sessions.lock().await.len().saturating_sub(1))
    }

    async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

pub fn identity(id: &str, name: &str) -> UserIdentity {
    UserIdentity::new(
        UserId::new(id.to_string()).unwrap(),
        UserName::new(name.to_string()).unwrap(),
    )
}

/// Register a session on `pusher` and hand back its id
pub async fn connected_session(pusher: &Arc<RecordingPusher>) -> SessionId {
    let session_id = SessionId::generate();
    let (tx, _rx) = mpsc::unbounded_channel();
    pusher.register_session(session_id, tx).await;
    session_id
}

/// Store whose append of a message reading `slow` blocks until `gate` is notified
#[derive(Default)]
pub struct GatedStore {
    pub gate: Notify,
}

#[async_trait]
impl MessageStore for GatedStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn append(&self, message: ChatMessage) -> Result<StoredMessage, StoreError> {
        if message.message.as_str() == "slow" {
            self.gate.notified().await;
        }
        let created_at = message.timestamp;
        Ok(StoredMessage::new(message, created_at))
    }

    async fn recent(&self, _limit: usize) -> Result<Vec<StoredMessage>, StoreError> {
        Ok(vec![])
    }

    async fn list_by_created_at(&self) -> Result<Vec<StoredMessage>, StoreError> {
        Ok(vec![])
    }
}
