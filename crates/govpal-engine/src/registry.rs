//! Multi-session bookkeeping.
//!
//! Sessions are independent; nothing is shared across them. Each session
//! is guarded by its own mutex so rule evaluation — which reads then
//! writes the ledger and adaptive set — is serialized per session while
//! unrelated sessions proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::errors::{EngineError, Result};
use crate::session::Session;

/// Concurrent map of live sessions.
#[derive(Default)]
pub struct SessionRegistry {
    sessions: DashMap<String, Arc<Mutex<Session>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create and register a session; returns its id.
    #[instrument(skip(self))]
    pub fn create(&self, department_id: &str, role: &str) -> String {
        let session = Session::new(department_id, role);
        let id = session.id.clone();
        let _ = self
            .sessions
            .insert(id.clone(), Arc::new(Mutex::new(session)));
        debug!(session_id = %id, department_id, role, "session created");
        id
    }

    /// Run a closure against a session under its lock.
    ///
    /// The closure sees (and may mutate) live state, so a deferred caller
    /// always operates on current ledger/document contents rather than on
    /// a snapshot taken when the work was scheduled.
    pub fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut Session) -> T,
    ) -> Result<T> {
        let handle = self
            .sessions
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| EngineError::SessionNotFound(session_id.to_string()))?;
        // Entry guard dropped above; only the per-session mutex is held
        // while the closure runs.
        let mut session = handle.lock();
        Ok(f(&mut session))
    }

    /// Whether a session id is registered.
    #[must_use]
    pub fn contains(&self, session_id: &str) -> bool {
        self.sessions.contains_key(session_id)
    }

    /// Remove a session. Returns `false` if the id was unknown.
    #[instrument(skip(self))]
    pub fn remove(&self, session_id: &str) -> bool {
        self.sessions.remove(session_id).is_some()
    }

    /// Number of live sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no sessions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
