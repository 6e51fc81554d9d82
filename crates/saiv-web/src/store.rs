//! In-memory store of signed-in browser sessions.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use saiv_client::ClientSession;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug)]
struct StoredSession {
    client: ClientSession,
    last_seen: Instant,
}

/// Browser session id → backend session, with an idle timeout.
///
/// An entry idle for longer than the timeout is dropped on the next lookup
/// or insert; there is no background sweeper.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<Uuid, StoredSession>,
    idle_timeout: Duration,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new(idle_timeout: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            idle_timeout,
        }
    }

    /// Stores a freshly signed-in session and returns its cookie id.
    pub fn insert(&self, client: ClientSession) -> Uuid {
        self.purge_idle();
        let id = Uuid::new_v4();
        self.sessions.insert(
            id,
            StoredSession {
                client,
                last_seen: Instant::now(),
            },
        );
        id
    }

    /// Looks up a session and marks it as used.
    pub fn get(&self, id: &Uuid) -> Option<ClientSession> {
        let mut entry = self.sessions.get_mut(id)?;
        if entry.last_seen.elapsed() >= self.idle_timeout {
            drop(entry);
            self.sessions.remove(id);
            debug!(session_id = %id, "Dashboard session expired after idle timeout");
            return None;
        }
        entry.last_seen = Instant::now();
        Some(entry.client.clone())
    }

    /// Discards a session. Returns whether it existed.
    pub fn remove(&self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Drops every session idle for longer than the timeout.
    pub fn purge_idle(&self) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, stored| stored.last_seen.elapsed() < self.idle_timeout);
        before.saturating_sub(self.sessions.len())
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
