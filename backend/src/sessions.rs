//! In-memory registry of user sessions
//!
//! Each session owns an isolated [`AppSession`]. Nothing is persisted; a
//! session lives until it is deleted or the process exits.

use std::collections::HashMap;
use std::sync::Arc;

use shared::AppSession;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

/// Handle to one session's state
pub type SessionHandle = Arc<Mutex<AppSession>>;

#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh session and return its id
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(AppSession::new())));
        tracing::debug!(session_id = %id, "Session created");
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<SessionHandle> {
        self.sessions.read().await.get(&id).cloned()
    }

    /// End a session. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "Session ended");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
