//! Chat session storage
//!
//! Sessions are created on first use and evicted once idle for longer than
//! the configured TTL. Each session sits behind its own async mutex so the
//! read-route-record sequence for one session id is serialized.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use super::state::SessionMemory;

/// Shared handle to one session's memory
pub type SessionHandle = Arc<tokio::sync::Mutex<SessionMemory>>;

pub trait SessionStore: Send + Sync {
    /// Fetch the session, creating it if absent. Refreshes its idle timer.
    fn get_or_create(&self, session_id: &str) -> SessionHandle;

    #[allow(dead_code)] // API completeness
    fn get(&self, session_id: &str) -> Option<SessionHandle>;

    #[allow(dead_code)] // API completeness
    fn remove(&self, session_id: &str) -> bool;

    fn len(&self) -> usize;

    /// Drop sessions idle since before `now - ttl`. Returns how many were removed.
    fn evict_expired(&self, now: Instant) -> usize;
}

struct Entry {
    session: SessionHandle,
    last_seen: Instant,
}

/// Process-local session store
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    fn touch(&self, session_id: &str, now: Instant) -> SessionHandle {
        let mut sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let entry = sessions.entry(session_id.to_string()).or_insert_with(|| {
            tracing::debug!(session_id, "Creating chat session");
            Entry {
                session: Arc::new(tokio::sync::Mutex::new(SessionMemory::new(session_id))),
                last_seen: now,
            }
        });
        entry.last_seen = now;
        Arc::clone(&entry.session)
    }
}

impl SessionStore for InMemorySessionStore {
    fn get_or_create(&self, session_id: &str) -> SessionHandle {
        self.touch(session_id, Instant::now())
    }

    fn get(&self, session_id: &str) -> Option<SessionHandle> {
        let sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.get(session_id).map(|e| Arc::clone(&e.session))
    }

    fn remove(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.remove(session_id).is_some()
    }

    fn len(&self) -> usize {
        let sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        sessions.len()
    }

    fn evict_expired(&self, now: Instant) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, entry| now.saturating_duration_since(entry.last_seen) <= self.ttl);
        before - sessions.len()
    }
}

/// Periodically evict idle sessions. Runs until the task is aborted.
pub fn spawn_sweeper(store: Arc<dyn SessionStore>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // First tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = store.evict_expired(Instant::now());
            if evicted > 0 {
                tracing::info!(evicted, remaining = store.len(), "Evicted idle chat sessions");
            }
        }
    })
}
