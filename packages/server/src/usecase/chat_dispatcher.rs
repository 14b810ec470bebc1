//! Single dispatch point for chat submissions.
//!
//! Session read loops only stamp and enqueue; one background task persists and
//! broadcasts each submission in enqueue order. A slow store therefore delays
//! chat delivery only, never presence or typing traffic, and broadcast order is
//! the order in which submissions were received.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};

use crate::domain::{MessageText, SessionId, UserName};

use super::{
    error::SendMessageError,
    send_message::{ChatSubmission, SendMessageUseCase},
};

/// Handle to the chat dispatch task
#[derive(Clone)]
pub struct ChatDispatcher {
    queue: mpsc::UnboundedSender<ChatSubmission>,
    usecase: Arc<SendMessageUseCase>,
}

impl ChatDispatcher {
    /// Spawn the dispatch task.
    ///
    /// The task stops once every `ChatDispatcher` clone has been dropped and the
    /// queue is drained.
    pub fn spawn(usecase: Arc<SendMessageUseCase>) -> (Self, JoinHandle<()>) {
        let (queue, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(dispatch_loop(rx, usecase.clone()));
        (Self { queue, usecase }, handle)
    }

    /// Stamp a message with the server time and enqueue it. Never waits on the store.
    pub fn submit(
        &self,
        origin: SessionId,
        user: UserName,
        message: MessageText,
    ) -> Result<(), SendMessageError> {
        let submission = self.usecase.accept(origin, user, message);
        self.queue
            .send(submission)
            .map_err(|_| SendMessageError::DispatcherClosed)
    }
}

async fn dispatch_loop(
    mut rx: mpsc::UnboundedReceiver<ChatSubmission>,
    usecase: Arc<SendMessageUseCase>,
) {
    while let Some(submission) = rx.recv().await {
        if let Err(e) = usecase.execute(submission).await {
            tracing::warn!("Chat message dropped: {}", e);
        }
    }
    tracing::debug!("Chat dispatcher stopped");
}
