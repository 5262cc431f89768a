//! Events a session pushes to its participants.
//!
//! Events are handed to the [`Notifier`](crate::ports::Notifier) port:
//! - `Joined` - sent only to the participant who just joined
//! - `RosterChanged` - membership changed
//! - `RoundStarted` / `RoundResumed` / `RoundPaused` / `RoundStopped` / `RoundReset`
//! - `ScoreSubmitted` - anonymous progress, never the value
//! - `ScoresRevealed` - every submitted score, once the round is complete

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ConnectionId;

use super::{Role, RoundState, Score};

/// Notification emitted by a [`Session`](super::Session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum PokerEvent {
    /// Welcome snapshot for a newly joined participant.
    Joined {
        session: String,
        role: Role,
        round_state: RoundState,
        round_duration_secs: u32,
    },

    /// Current membership, in join order.
    RosterChanged { roster: Vec<RosterEntry> },

    /// A fresh timed round began; scores were cleared.
    RoundStarted { duration_secs: u32 },

    /// A paused round continues with its scores intact.
    RoundResumed,

    RoundPaused,

    RoundStopped,

    /// Round returned to idle; scores were cleared.
    RoundReset,

    /// Someone submitted a score.
    ScoreSubmitted { submitted: usize, expected: usize },

    /// All submitted scores, in roster order.
    ScoresRevealed { scores: Vec<RevealedScore> },
}

impl PokerEvent {
    /// Short name used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            PokerEvent::Joined { .. } => "joined",
            PokerEvent::RosterChanged { .. } => "roster_changed",
            PokerEvent::RoundStarted { .. } => "round_started",
            PokerEvent::RoundResumed => "round_resumed",
            PokerEvent::RoundPaused => "round_paused",
            PokerEvent::RoundStopped => "round_stopped",
            PokerEvent::RoundReset => "round_reset",
            PokerEvent::ScoreSubmitted { .. } => "score_submitted",
            PokerEvent::ScoresRevealed { .. } => "scores_revealed",
        }
    }
}

/// One line of the roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub connection_id: ConnectionId,
    pub display_name: String,
    pub role: Role,
}

/// One revealed estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedScore {
    pub connection_id: ConnectionId,
    pub display_name: String,
    pub score: Score,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_started_serializes_with_type_tag() {
        let json = serde_json::to_string(&PokerEvent::RoundStarted { duration_secs: 30 }).unwrap();
        assert!(json.contains(r#""type":"round_started""#));
        assert!(json.contains(r#""durationSecs":30"#));
    }

    #[test]
    fn unit_events_serialize_as_tag_only() {
        let json = serde_json::to_string(&PokerEvent::RoundPaused).unwrap();
        assert_eq!(json, r#"{"type":"round_paused"}"#);
    }

    #[test]
    fn roster_entry_uses_camel_case() {
        let event = PokerEvent::RosterChanged {
            roster: vec![RosterEntry {
                connection_id: ConnectionId::from("c-1"),
                display_name: "Ann".to_string(),
                role: Role::Host,
            }],
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""displayName":"Ann""#));
        assert!(json.contains(r#""connectionId":"c-1""#));
        assert!(json.contains(r#""role":"host""#));
    }

    #[test]
    fn score_submitted_does_not_carry_values() {
        let json = serde_json::to_string(&PokerEvent::ScoreSubmitted {
            submitted: 1,
            expected: 3,
        })
        .unwrap();
        assert_eq!(json, r#"{"type":"score_submitted","submitted":1,"expected":3}"#);
    }

    #[test]
    fn kind_matches_serialized_tag() {
        let event = PokerEvent::ScoresRevealed { scores: vec![] };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], event.kind());
    }
}
