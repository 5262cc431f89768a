//! Poker-specific error types.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{ConnectionId, ErrorCode, TransitionError, ValidationError};

use super::Role;

/// Operation that may be refused based on the caller's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SubmitScore,
    ControlRound,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SubmitScore => write!(f, "submit scores"),
            Action::ControlRound => write!(f, "control rounds"),
        }
    }
}

/// Errors surfaced by session and registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PokerError {
    #[error("Session name already in use: {0}")]
    NameConflict(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Connection {0} already belongs to a session")]
    ConnectionAlreadyJoined(ConnectionId),

    #[error("A {role} may not {action}")]
    NotPermitted { role: Role, action: Action },

    #[error("Invalid round transition: {0}")]
    InvalidTransition(#[from] TransitionError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl PokerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PokerError::NameConflict(_) => ErrorCode::NameConflict,
            PokerError::SessionNotFound(_) => ErrorCode::SessionNotFound,
            PokerError::ConnectionAlreadyJoined(_) => ErrorCode::ConnectionAlreadyJoined,
            PokerError::NotPermitted { .. } => ErrorCode::NotPermitted,
            PokerError::InvalidTransition(_) => ErrorCode::InvalidStateTransition,
            PokerError::Validation(err) => err.code(),
        }
    }
}
