//! Participants and their roles within a session.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ConnectionId;

/// What a participant is allowed to do in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Controls the round lifecycle, does not estimate.
    Host,
    /// Controls the round lifecycle and estimates.
    ParticipatingHost,
    /// Estimates, does not control rounds.
    Player,
    /// Observes only.
    Viewer,
}

impl Role {
    /// Role given to the creator of a session.
    pub fn for_host(participating: bool) -> Self {
        if participating {
            Role::ParticipatingHost
        } else {
            Role::Host
        }
    }

    /// Returns true if this role submits scores.
    pub fn can_score(&self) -> bool {
        matches!(self, Role::Player | Role::ParticipatingHost)
    }

    /// Returns true if this role starts, pauses, stops and resets rounds.
    pub fn can_control_round(&self) -> bool {
        matches!(self, Role::Host | Role::ParticipatingHost)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Host => "host",
            Role::ParticipatingHost => "participating host",
            Role::Player => "player",
            Role::Viewer => "viewer",
        };
        write!(f, "{}", s)
    }
}

/// One connected person in a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    connection_id: ConnectionId,
    display_name: String,
    role: Role,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            connection_id,
            display_name: display_name.into(),
            role,
        }
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_role_follows_participating_flag() {
        assert_eq!(Role::for_host(true), Role::ParticipatingHost);
        assert_eq!(Role::for_host(false), Role::Host);
    }

    #[test]
    fn scoring_roles() {
        assert!(Role::Player.can_score());
        assert!(Role::ParticipatingHost.can_score());
        assert!(!Role::Host.can_score());
        assert!(!Role::Viewer.can_score());
    }

    #[test]
    fn round_control_roles() {
        assert!(Role::Host.can_control_round());
        assert!(Role::ParticipatingHost.can_control_round());
        assert!(!Role::Player.can_control_round());
        assert!(!Role::Viewer.can_control_round());
    }

    #[test]
    fn role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::ParticipatingHost).unwrap();
        assert_eq!(json, r#""participating_host""#);
    }
}
