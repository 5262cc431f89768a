//! SessionRegistry - process-wide directory of live sessions.
//!
//! Resolves a connection to the session it belongs to, creates sessions on
//! request and destroys them when their last participant leaves. All
//! domain rules live in [`Session`]; the registry only routes.
//!
//! # Concurrency
//!
//! ```text
//! RwLock<RegistryState>                Mutex<SessionState> (per session)
//! ├── sessions:    name → Arc<Session>  ├── participants
//! └── connections: conn → name          ├── scores
//!                                       └── round
//! ```
//!
//! Membership changes (create, join, leave) take the registry write lock
//! and then the session lock, so a leave that empties a session can never
//! interleave with a join into it. Scoring and round control only need the
//! read lock long enough to resolve the session.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::foundation::{ConnectionId, ValidationError};
use crate::domain::poker::{PokerError, Role, Score, Session, SessionPolicy, SessionSnapshot};
use crate::ports::Notifier;

/// Command to open a new session with its host.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub name: String,
    pub host_display_name: String,
    pub round_duration_secs: u32,
    pub participating: bool,
}

#[derive(Default)]
struct RegistryState {
    sessions: HashMap<String, Arc<Session>>,
    /// Secondary index so resolution is O(1) instead of scanning every roster.
    connections: HashMap<ConnectionId, String>,
}

/// Directory of live sessions, shared by every connection handler.
///
/// Constructed once by the process entry point and handed to the
/// transport layer; independent instances never share state.
pub struct SessionRegistry {
    notifier: Arc<dyn Notifier>,
    policy: SessionPolicy,
    state: RwLock<RegistryState>,
}

impl SessionRegistry {
    pub fn new(notifier: Arc<dyn Notifier>, policy: SessionPolicy) -> Self {
        Self {
            notifier,
            policy,
            state: RwLock::new(RegistryState::default()),
        }
    }

    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a session and add the caller as its host.
    ///
    /// # Errors
    ///
    /// - `Validation` if a name is blank or too long, or the duration exceeds the limit
    /// - `ConnectionAlreadyJoined` if the caller is already in a session
    /// - `NameConflict` if a live session already uses the name
    pub fn create_session(
        &self,
        cmd: CreateSessionCommand,
        connection_id: ConnectionId,
    ) -> Result<(), PokerError> {
        let name = self.validate_name("name", &cmd.name)?;
        let host_name = self.validate_name("display_name", &cmd.host_display_name)?;
        if cmd.round_duration_secs > self.policy.max_round_duration_secs {
            return Err(ValidationError::out_of_range(
                "round_duration",
                self.policy.max_round_duration_secs,
                cmd.round_duration_secs,
            )
            .into());
        }

        let mut state = self.write();
        if state.connections.contains_key(&connection_id) {
            return Err(PokerError::ConnectionAlreadyJoined(connection_id));
        }
        if state.sessions.contains_key(&name) {
            tracing::debug!(session = %name, "Session name already in use");
            return Err(PokerError::NameConflict(name));
        }

        let session = Arc::new(Session::new(
            name.clone(),
            cmd.round_duration_secs,
            self.policy,
            self.notifier.clone(),
        ));
        session.add_participant(host_name, connection_id.clone(), Role::for_host(cmd.participating))?;

        state.connections.insert(connection_id.clone(), name.clone());
        state.sessions.insert(name.clone(), session);
        tracing::info!(
            session = %name,
            connection_id = %connection_id,
            duration = cmd.round_duration_secs,
            participating = cmd.participating,
            "Session created"
        );
        Ok(())
    }

    /// Join an existing session as an estimator.
    ///
    /// # Errors
    ///
    /// - `SessionNotFound` if no live session has that name
    /// - `ConnectionAlreadyJoined` if the caller is already in a session
    /// - `Validation` if the display name is blank or too long
    pub fn join_as_player(
        &self,
        name: &str,
        display_name: &str,
        connection_id: ConnectionId,
    ) -> Result<(), PokerError> {
        self.join(name, display_name, connection_id, Role::Player)
    }

    /// Join an existing session as an observer.
    ///
    /// Same errors as [`join_as_player`](Self::join_as_player).
    pub fn join_as_viewer(
        &self,
        name: &str,
        display_name: &str,
        connection_id: ConnectionId,
    ) -> Result<(), PokerError> {
        self.join(name, display_name, connection_id, Role::Viewer)
    }

    /// Remove the caller from their session, destroying it if it empties.
    ///
    /// Unknown connections are ignored.
    pub fn leave(&self, connection_id: &ConnectionId) {
        let mut state = self.write();
        let Some(name) = state.connections.remove(connection_id) else {
            return;
        };
        let Some(session) = state.sessions.get(&name).cloned() else {
            return;
        };

        if session.remove_participant(connection_id) == Some(0) {
            state.sessions.remove(&name);
            tracing::info!(session = %name, "Last participant left, session closed");
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Delegated operations (no-op when the connection has no session)
    // ─────────────────────────────────────────────────────────────────────────

    pub fn submit_score(
        &self,
        score: impl Into<Score>,
        connection_id: &ConnectionId,
    ) -> Result<(), PokerError> {
        match self.resolve(connection_id) {
            Some(session) => session.submit_score(score, connection_id),
            None => Ok(()),
        }
    }

    pub fn start_round(&self, connection_id: &ConnectionId) -> Result<(), PokerError> {
        self.with_session(connection_id, |session| session.start_round(connection_id))
    }

    pub fn pause_round(&self, connection_id: &ConnectionId) -> Result<(), PokerError> {
        self.with_session(connection_id, |session| session.pause_round(connection_id))
    }

    pub fn stop_round(&self, connection_id: &ConnectionId) -> Result<(), PokerError> {
        self.with_session(connection_id, |session| session.stop_round(connection_id))
    }

    pub fn reset_round(&self, connection_id: &ConnectionId) -> Result<(), PokerError> {
        self.with_session(connection_id, |session| session.reset_round(connection_id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// The session a connection belongs to, if any.
    pub fn resolve(&self, connection_id: &ConnectionId) -> Option<Arc<Session>> {
        let state = self.read();
        state
            .connections
            .get(connection_id)
            .and_then(|name| state.sessions.get(name))
            .cloned()
    }

    pub fn session(&self, name: &str) -> Option<Arc<Session>> {
        self.read().sessions.get(name).cloned()
    }

    pub fn contains_session(&self, name: &str) -> bool {
        self.read().sessions.contains_key(name)
    }

    pub fn snapshot(&self, name: &str) -> Option<SessionSnapshot> {
        self.session(name).map(|session| session.snapshot())
    }

    /// Names of all live sessions, sorted.
    pub fn session_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().sessions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn session_count(&self) -> usize {
        self.read().sessions.len()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn join(
        &self,
        name: &str,
        display_name: &str,
        connection_id: ConnectionId,
        role: Role,
    ) -> Result<(), PokerError> {
        let name = name.trim();
        let display_name = self.validate_name("display_name", display_name)?;

        let mut state = self.write();
        let session = state
            .sessions
            .get(name)
            .cloned()
            .ok_or_else(|| PokerError::SessionNotFound(name.to_string()))?;
        if state.connections.contains_key(&connection_id) {
            return Err(PokerError::ConnectionAlreadyJoined(connection_id));
        }

        session.add_participant(display_name, connection_id.clone(), role)?;
        state.connections.insert(connection_id, name.to_string());
        Ok(())
    }

    fn with_session<F>(&self, connection_id: &ConnectionId, op: F) -> Result<(), PokerError>
    where
        F: FnOnce(&Session) -> Result<(), PokerError>,
    {
        match self.resolve(connection_id) {
            Some(session) => op(session.as_ref()),
            None => {
                tracing::trace!(connection_id = %connection_id, "No session for connection, ignoring");
                Ok(())
            }
        }
    }

    fn validate_name(&self, field: &str, value: &str) -> Result<String, ValidationError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(field));
        }
        let length = trimmed.chars().count();
        if length > self.policy.max_name_length {
            return Err(ValidationError::too_long(
                field,
                self.policy.max_name_length,
                length,
            ));
        }
        Ok(trimmed.to_string())
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
