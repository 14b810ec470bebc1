//! Online presence registry.
//!
//! Maps live sessions to the identity they announced. The listing order is join
//! order: re-announcing on an already registered session overwrites the identity
//! in place and keeps its position. Several sessions may share a name.

use super::{SessionId, UserIdentity};

/// In-memory presence map, keyed by session
#[derive(Debug, Clone, Default)]
pub struct PresenceRegistry {
    entries: Vec<(SessionId, UserIdentity)>,
}

impl PresenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the identity bound to `session_id` and return the updated snapshot
    pub fn register(&mut self, session_id: SessionId, identity: UserIdentity) -> Vec<UserIdentity> {
        match self.entries.iter_mut().find(|(id, _)| *id == session_id) {
            Some((_, existing)) => *existing = identity,
            None => self.entries.push((session_id, identity)),
        }
        self.snapshot()
    }

    /// Remove the mapping for `session_id` if present and return the updated snapshot
    pub fn unregister(&mut self, session_id: &SessionId) -> Vec<UserIdentity> {
        self.entries.retain(|(id, _)| id != session_id);
        self.snapshot()
    }

    /// Currently registered identities in join order
    pub fn snapshot(&self) -> Vec<UserIdentity> {
        self.entries
            .iter()
            .map(|(_, identity)| identity.clone())
            .collect()
    }
}
