//! Session-keyed conversation storage
//!
//! Each session owns an independent [`ConversationHistory`]. Sessions are
//! created on first touch and evicted least-recently-active-first once the
//! store reaches capacity. Retention here and the outbound prompt window
//! are two independent knobs.

use super::history::{ConversationHistory, Turn};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Session id used when the client does not supply one
pub const DEFAULT_SESSION: &str = "default";

/// Live-session cap before least-recently-active eviction kicks in
const MAX_SESSIONS: usize = 256;

struct SessionEntry {
    history: ConversationHistory,
    last_active: u64,
}

/// Interior state guarded by the store's mutex.
///
/// `clock` is a logical counter bumped on every touch; it orders entries
/// for eviction without depending on wall-clock resolution.
struct Sessions {
    entries: HashMap<String, SessionEntry>,
    clock: u64,
}

impl Sessions {
    fn touch(&mut self, session: &str) -> &mut SessionEntry {
        self.clock += 1;
        let stamp = self.clock;

        if !self.entries.contains_key(session) && self.entries.len() >= MAX_SESSIONS {
            self.evict_stalest();
        }

        let entry = self
            .entries
            .entry(session.to_string())
            .or_insert_with(|| SessionEntry {
                history: ConversationHistory::new(),
                last_active: stamp,
            });
        entry.last_active = stamp;
        entry
    }

    fn evict_stalest(&mut self) {
        let stalest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_active)
            .map(|(id, _)| id.clone());
        if let Some(id) = stalest {
            tracing::debug!(session = %id, "Evicting least-recently-active session");
            self.entries.remove(&id);
        }
    }
}

/// Addressable map of conversation histories, keyed by session id
pub struct SessionStore {
    inner: Mutex<Sessions>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Sessions {
                entries: HashMap::new(),
                clock: 0,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Sessions> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append a turn to the session's transcript, creating the session on
    /// first touch
    pub fn append(&self, session: &str, turn: Turn) {
        self.lock().touch(session).history.append(turn);
    }

    /// The session's last `min(k, len)` turns, oldest first.
    ///
    /// An unknown session yields an empty window without creating it.
    pub fn window(&self, session: &str, k: usize) -> Vec<Turn> {
        let guard = self.lock();
        guard
            .entries
            .get(session)
            .map(|entry| entry.history.window(k).to_vec())
            .unwrap_or_default()
    }

    /// Full transcript of the session, oldest first.
    ///
    /// An unknown session yields an empty transcript without creating it.
    pub fn snapshot(&self, session: &str) -> Vec<Turn> {
        let guard = self.lock();
        guard
            .entries
            .get(session)
            .map(|entry| entry.history.snapshot().to_vec())
            .unwrap_or_default()
    }

    /// Empty the session's transcript. Idempotent; clearing an unknown
    /// session is a no-op and does not create it.
    pub fn clear(&self, session: &str) {
        let mut guard = self.lock();
        if let Some(entry) = guard.entries.get_mut(session) {
            entry.history.clear();
        }
    }

    #[cfg(test)]
    fn session_count(&self) -> usize {
        self.lock().entries.len()
    }

    #[cfg(test)]
    fn contains(&self, session: &str) -> bool {
        self.lock().entries.contains_key(session)
    }
}
