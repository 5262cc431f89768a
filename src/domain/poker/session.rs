//! Session aggregate - one team's planning poker room.
//!
//! A session owns its participants, the round state and the scores of the
//! current round. Every mutation happens under a single internal lock, and
//! notifications are emitted while that lock is held, so what participants
//! are told always matches the membership at that instant.
//!
//! # Invariants
//!
//! - `name` and `round_duration` never change after creation
//! - A connection appears at most once in the roster
//! - Scores exist only for current participants
//! - Scores are cleared whenever a fresh round starts or the round resets

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{ConnectionId, StateMachine};
use crate::ports::Notifier;

use super::{
    Action, Participant, PokerError, PokerEvent, RevealedScore, Role, RosterEntry, RoundState,
    Score, SessionPolicy,
};

/// Point-in-time view of a session, for introspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub name: String,
    pub round_duration_secs: u32,
    pub round_state: RoundState,
    pub roster: Vec<RosterEntry>,
    pub submitted: usize,
}

/// Mutable part of a session, guarded by one lock.
#[derive(Debug, Default)]
struct SessionState {
    participants: Vec<Participant>,
    scores: HashMap<ConnectionId, Score>,
    round: RoundState,
}

impl SessionState {
    fn participant(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.connection_id() == connection_id)
    }

    fn recipients(&self) -> Vec<ConnectionId> {
        self.participants
            .iter()
            .map(|p| p.connection_id().clone())
            .collect()
    }

    fn roster(&self) -> Vec<RosterEntry> {
        self.participants
            .iter()
            .map(|p| RosterEntry {
                connection_id: p.connection_id().clone(),
                display_name: p.display_name().to_string(),
                role: p.role(),
            })
            .collect()
    }

    fn expected_scores(&self, policy: &SessionPolicy) -> usize {
        self.participants
            .iter()
            .filter(|p| policy.is_estimator(p.role()))
            .count()
    }

    /// True once every estimating participant has a score on the table.
    fn all_scored(&self, policy: &SessionPolicy) -> bool {
        let mut scorers = self
            .participants
            .iter()
            .filter(|p| policy.is_estimator(p.role()))
            .peekable();
        scorers.peek().is_some() && scorers.all(|p| self.scores.contains_key(p.connection_id()))
    }

    fn revealed(&self) -> Vec<RevealedScore> {
        self.participants
            .iter()
            .filter_map(|p| {
                self.scores.get(p.connection_id()).map(|score| RevealedScore {
                    connection_id: p.connection_id().clone(),
                    display_name: p.display_name().to_string(),
                    score: score.clone(),
                })
            })
            .collect()
    }
}

/// One team's estimation room.
pub struct Session {
    name: String,
    round_duration: u32,
    policy: SessionPolicy,
    notifier: Arc<dyn Notifier>,
    state: Mutex<SessionState>,
}

impl Session {
    /// Create an empty idle session.
    ///
    /// Callers add the host immediately; an empty session is never
    /// addressable through the registry.
    pub fn new(
        name: impl Into<String>,
        round_duration: u32,
        policy: SessionPolicy,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            name: name.into(),
            round_duration,
            policy,
            notifier,
            state: Mutex::new(SessionState::default()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn round_duration(&self) -> u32 {
        self.round_duration
    }

    pub fn round_state(&self) -> RoundState {
        self.lock().round
    }

    pub fn participant_count(&self) -> usize {
        self.lock().participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().participants.is_empty()
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.lock().participant(connection_id).is_some()
    }

    pub fn role_of(&self, connection_id: &ConnectionId) -> Option<Role> {
        self.lock().participant(connection_id).map(Participant::role)
    }

    /// Current membership in join order.
    pub fn roster(&self) -> Vec<RosterEntry> {
        self.lock().roster()
    }

    /// The authoritative score for a connection in the current round.
    pub fn score_of(&self, connection_id: &ConnectionId) -> Option<Score> {
        self.lock().scores.get(connection_id).cloned()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            name: self.name.clone(),
            round_duration_secs: self.round_duration,
            round_state: state.round,
            roster: state.roster(),
            submitted: state.scores.len(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Membership
    // ─────────────────────────────────────────────────────────────────────────

    /// Add a participant and tell everyone about the new roster.
    ///
    /// The newcomer additionally receives a `Joined` snapshot.
    ///
    /// # Errors
    ///
    /// - `ConnectionAlreadyJoined` if the connection is already in this session
    pub fn add_participant(
        &self,
        display_name: impl Into<String>,
        connection_id: ConnectionId,
        role: Role,
    ) -> Result<(), PokerError> {
        let mut state = self.lock();
        if state.participant(&connection_id).is_some() {
            return Err(PokerError::ConnectionAlreadyJoined(connection_id));
        }

        let participant = Participant::new(connection_id.clone(), display_name, role);
        tracing::debug!(
            session = %self.name,
            connection_id = %connection_id,
            display_name = participant.display_name(),
            ?role,
            "Participant joined"
        );
        state.participants.push(participant);

        self.notifier.send(
            &connection_id,
            &PokerEvent::Joined {
                session: self.name.clone(),
                role,
                round_state: state.round,
                round_duration_secs: self.round_duration,
            },
        );
        self.notify_roster(&state);
        Ok(())
    }

    /// Remove a participant and any score they submitted.
    ///
    /// Returns the number of participants left, or `None` if the connection
    /// was not a member (nothing is emitted in that case).
    pub fn remove_participant(&self, connection_id: &ConnectionId) -> Option<usize> {
        let mut state = self.lock();
        let index = state
            .participants
            .iter()
            .position(|p| p.connection_id() == connection_id)?;
        let was_pending = self.policy.is_estimator(state.participants[index].role())
            && !state.scores.contains_key(connection_id);

        state.participants.remove(index);
        state.scores.remove(connection_id);
        tracing::debug!(
            session = %self.name,
            connection_id = %connection_id,
            remaining = state.participants.len(),
            "Participant left"
        );

        self.notify_roster(&state);

        // The leaver may have been the last estimate the round was waiting on.
        if was_pending
            && state.round.is_in_progress()
            && !state.scores.is_empty()
            && state.all_scored(&self.policy)
        {
            self.notify_reveal(&state);
        }

        Some(state.participants.len())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Scoring
    // ─────────────────────────────────────────────────────────────────────────

    /// Record a score for a participant; last write wins.
    ///
    /// Everyone is told that a score arrived (not its value). When every
    /// estimating participant has submitted, the full set is revealed.
    /// Without role enforcement every member is an estimator.
    /// Scores from connections that are not members are ignored.
    ///
    /// # Errors
    ///
    /// - `NotPermitted` if scoring roles are enforced and the caller does not estimate
    pub fn submit_score(
        &self,
        score: impl Into<Score>,
        connection_id: &ConnectionId,
    ) -> Result<(), PokerError> {
        let mut state = self.lock();
        let Some(role) = state.participant(connection_id).map(Participant::role) else {
            tracing::debug!(
                session = %self.name,
                connection_id = %connection_id,
                "Ignoring score from non-member"
            );
            return Ok(());
        };

        if self.policy.enforce_scoring_roles && !role.can_score() {
            tracing::warn!(
                session = %self.name,
                connection_id = %connection_id,
                ?role,
                "Rejected score from non-estimating role"
            );
            return Err(PokerError::NotPermitted {
                role,
                action: Action::SubmitScore,
            });
        }

        state.scores.insert(connection_id.clone(), score.into());
        tracing::debug!(
            session = %self.name,
            connection_id = %connection_id,
            submitted = state.scores.len(),
            "Score submitted"
        );

        self.broadcast(
            &state,
            &PokerEvent::ScoreSubmitted {
                submitted: state.scores.len(),
                expected: state.expected_scores(&self.policy),
            },
        );
        if state.all_scored(&self.policy) {
            self.notify_reveal(&state);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Round control
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a fresh timed round, or resume a paused one.
    ///
    /// A fresh round clears all scores; resuming keeps them.
    pub fn start_round(&self, actor: &ConnectionId) -> Result<(), PokerError> {
        let mut state = self.lock();
        self.authorize_round_control(&state, actor)?;

        let resuming = state.round == RoundState::Paused;
        state.round = state.round.transition_to(RoundState::Running)?;

        if resuming {
            tracing::debug!(session = %self.name, "Round resumed");
            self.broadcast(&state, &PokerEvent::RoundResumed);
        } else {
            state.scores.clear();
            tracing::debug!(session = %self.name, duration = self.round_duration, "Round started");
            self.broadcast(
                &state,
                &PokerEvent::RoundStarted {
                    duration_secs: self.round_duration,
                },
            );
        }
        Ok(())
    }

    /// Pause a running round.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the round is running
    pub fn pause_round(&self, actor: &ConnectionId) -> Result<(), PokerError> {
        let mut state = self.lock();
        self.authorize_round_control(&state, actor)?;

        state.round = state.round.transition_to(RoundState::Paused)?;
        tracing::debug!(session = %self.name, "Round paused");
        self.broadcast(&state, &PokerEvent::RoundPaused);
        Ok(())
    }

    /// Stop a running or paused round. Scores stay until reset.
    ///
    /// Any scores already submitted are revealed.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the round is running or paused
    pub fn stop_round(&self, actor: &ConnectionId) -> Result<(), PokerError> {
        let mut state = self.lock();
        self.authorize_round_control(&state, actor)?;

        state.round = state.round.transition_to(RoundState::Stopped)?;
        tracing::debug!(session = %self.name, submitted = state.scores.len(), "Round stopped");
        self.broadcast(&state, &PokerEvent::RoundStopped);
        if !state.scores.is_empty() {
            self.notify_reveal(&state);
        }
        Ok(())
    }

    /// Return to idle from any state and clear all scores.
    pub fn reset_round(&self, actor: &ConnectionId) -> Result<(), PokerError> {
        let mut state = self.lock();
        self.authorize_round_control(&state, actor)?;

        state.round = state.round.transition_to(RoundState::Idle)?;
        state.scores.clear();
        tracing::debug!(session = %self.name, "Round reset");
        self.broadcast(&state, &PokerEvent::RoundReset);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn authorize_round_control(
        &self,
        state: &SessionState,
        actor: &ConnectionId,
    ) -> Result<(), PokerError> {
        if !self.policy.host_only_round_control {
            return Ok(());
        }
        match state.participant(actor).map(Participant::role) {
            Some(role) if role.can_control_round() => Ok(()),
            Some(role) => {
                tracing::warn!(
                    session = %self.name,
                    connection_id = %actor,
                    ?role,
                    "Rejected round control from non-host role"
                );
                Err(PokerError::NotPermitted {
                    role,
                    action: Action::ControlRound,
                })
            }
            // Outsiders have no role to check; treat them as viewers.
            None => Err(PokerError::NotPermitted {
                role: Role::Viewer,
                action: Action::ControlRound,
            }),
        }
    }

    fn broadcast(&self, state: &SessionState, event: &PokerEvent) {
        self.notifier.broadcast(&state.recipients(), event);
    }

    fn notify_roster(&self, state: &SessionState) {
        self.broadcast(
            state,
            &PokerEvent::RosterChanged {
                roster: state.roster(),
            },
        );
    }

    fn notify_reveal(&self, state: &SessionState) {
        tracing::debug!(session = %self.name, count = state.scores.len(), "Scores revealed");
        self.broadcast(
            state,
            &PokerEvent::ScoresRevealed {
                scores: state.revealed(),
            },
        );
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("name", &self.name)
            .field("round_duration", &self.round_duration)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
