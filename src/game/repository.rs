use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::debug;

use super::models::GameSession;

pub type SharedSession = Arc<AsyncMutex<GameSession>>;

/// Live game sessions, keyed by session id.
///
/// Each session sits behind its own async mutex so that a long operation
/// on one game (such as persisting it on submit) never blocks the others.
pub struct SessionRepository {
    sessions: Arc<RwLock<HashMap<String, SharedSession>>>,
}

impl Default for SessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn insert(&self, session: GameSession) -> SharedSession {
        let id = session.id.clone();
        let shared = Arc::new(AsyncMutex::new(session));
        let mut sessions = self.sessions.write().await;
        sessions.insert(id.clone(), Arc::clone(&shared));
        debug!(session_id = %id, session_count = sessions.len(), "Session stored");
        shared
    }

    pub async fn get(&self, session_id: &str) -> Option<SharedSession> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    pub async fn remove(&self, session_id: &str) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session that is stale at `now` and returns their ids
    pub async fn evict_stale(&self, now: DateTime<Utc>, idle_timeout: Duration) -> Vec<String> {
        // Snapshot the handles first so no session lock is awaited under the map lock
        let candidates: Vec<(String, SharedSession)> = {
            let sessions = self.sessions.read().await;
            sessions
                .iter()
                .map(|(id, shared)| (id.clone(), Arc::clone(shared)))
                .collect()
        };

        let mut stale = Vec::new();
        for (id, shared) in candidates {
            if shared.lock().await.is_stale(now, idle_timeout) {
                stale.push(id);
            }
        }

        if stale.is_empty() {
            return stale;
        }

        // Re-check under the map lock; a session in use or touched since is kept
        let mut sessions = self.sessions.write().await;
        stale.retain(|id| {
            let still_stale = sessions
                .get(id)
                .and_then(|shared| shared.try_lock().ok())
                .map(|session| session.is_stale(now, idle_timeout))
                .unwrap_or(false);
            if still_stale {
                sessions.remove(id);
            }
            still_stale
        });
        debug!(
            evicted = stale.len(),
            session_count = sessions.len(),
            "Stale sessions evicted"
        );
        stale
    }
}
