//! Round lifecycle state.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Where a session is in its current estimation round.
///
/// ```text
/// Idle ──start──▶ Running ◀──resume── Paused
///                  │  ▲ ──pause──────▶  │
///                  │  └── restart       │
///                  └──stop──▶ Stopped ◀─┘
///
/// reset: any ──▶ Idle      start: Stopped ──▶ Running
/// ```
///
/// There is no separate resume command: starting a `Paused` round resumes
/// it with its scores intact, while every other start clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    #[default]
    Idle,
    Running,
    Paused,
    Stopped,
}

impl StateMachine for RoundState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use RoundState::*;
        matches!(
            (self, target),
            (_, Idle)
                | (Idle, Running)
                | (Running, Running)
                | (Paused, Running)
                | (Stopped, Running)
                | (Running, Paused)
                | (Running, Stopped)
                | (Paused, Stopped)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use RoundState::*;
        match self {
            Idle => vec![Idle, Running],
            Running => vec![Idle, Running, Paused, Stopped],
            Paused => vec![Idle, Running, Stopped],
            Stopped => vec![Idle, Running],
        }
    }
}

impl RoundState {
    /// Returns true while estimates are being collected.
    pub fn is_in_progress(&self) -> bool {
        matches!(self, RoundState::Running | RoundState::Paused)
    }
}
