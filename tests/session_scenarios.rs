//! End-to-end planning poker scenarios against the public registry API.
//!
//! Uses `RecordingNotifier` to observe exactly what each participant is told.

use std::sync::Arc;

use planning_poker::adapters::RecordingNotifier;
use planning_poker::application::{CreateSessionCommand, SessionRegistry};
use planning_poker::domain::foundation::ConnectionId;
use planning_poker::domain::poker::{
    PokerError, PokerEvent, Role, RoundState, Score, SessionPolicy,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Table {
    registry: SessionRegistry,
    notifier: Arc<RecordingNotifier>,
}

impl Table {
    fn new(policy: SessionPolicy) -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        Self {
            registry: SessionRegistry::new(notifier.clone(), policy),
            notifier,
        }
    }

    fn create(&self, name: &str, host: &str, duration: u32, participating: bool, id: &ConnectionId) {
        self.registry
            .create_session(
                CreateSessionCommand {
                    name: name.to_string(),
                    host_display_name: host.to_string(),
                    round_duration_secs: duration,
                    participating,
                },
                id.clone(),
            )
            .expect("session should be created");
    }
}

fn ids() -> (ConnectionId, ConnectionId, ConnectionId) {
    (
        ConnectionId::generate(),
        ConnectionId::generate(),
        ConnectionId::generate(),
    )
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn full_round_reveals_scores_of_estimators_only() {
    let table = Table::new(SessionPolicy::default());
    let (ann, bob, cara) = ids();

    table.create("Alpha", "Ann", 30, true, &ann);
    table.registry.join_as_player("Alpha", "Bob", bob.clone()).unwrap();
    table.registry.join_as_viewer("Alpha", "Cara", cara.clone()).unwrap();

    table.registry.start_round(&ann).unwrap();
    assert!(table
        .notifier
        .events_for(&cara)
        .contains(&PokerEvent::RoundStarted { duration_secs: 30 }));

    table.registry.submit_score("5", &bob).unwrap();
    assert!(table.notifier.last_reveal_for(&cara).is_none());
    table.registry.submit_score("8", &ann).unwrap();

    for recipient in [&ann, &bob, &cara] {
        let reveal = table.notifier.last_reveal_for(recipient).unwrap();
        let by_name: Vec<(&str, &str)> = reveal
            .iter()
            .map(|r| (r.display_name.as_str(), r.score.as_str()))
            .collect();
        assert_eq!(by_name, vec![("Ann", "8"), ("Bob", "5")]);
        assert!(reveal.iter().all(|r| r.connection_id != cara));
    }
}

#[test]
fn session_survives_until_last_participant_leaves() {
    let table = Table::new(SessionPolicy::default());
    let (ann, bob, zed) = ids();

    table.create("Alpha", "Ann", 30, true, &ann);
    table.registry.join_as_player("Alpha", "Bob", bob.clone()).unwrap();

    table.registry.leave(&ann);
    let snapshot = table.registry.snapshot("Alpha").expect("session still live");
    assert_eq!(snapshot.roster.len(), 1);
    assert_eq!(snapshot.roster[0].display_name, "Bob");
    assert_eq!(table.notifier.last_roster_for(&bob).unwrap(), snapshot.roster);

    table.registry.leave(&bob);
    assert!(table.registry.snapshot("Alpha").is_none());
    assert!(table.registry.resolve(&bob).is_none());

    table.create("Alpha", "Zed", 60, false, &zed);
    assert_eq!(table.registry.snapshot("Alpha").unwrap().round_duration_secs, 60);
}

#[test]
fn round_control_from_unknown_connection_emits_nothing() {
    let table = Table::new(SessionPolicy::default());
    let (ann, _, ghost) = ids();
    table.create("Alpha", "Ann", 30, true, &ann);
    table.notifier.clear();

    table.registry.start_round(&ghost).unwrap();
    table.registry.pause_round(&ghost).unwrap();
    table.registry.stop_round(&ghost).unwrap();

    assert_eq!(table.notifier.count(), 0);
    assert_eq!(
        table.registry.session("Alpha").unwrap().round_state(),
        RoundState::Idle
    );
}

#[test]
fn reset_after_any_state_clears_scores() {
    let table = Table::new(SessionPolicy::default());
    let (ann, bob, _) = ids();
    table.create("Alpha", "Ann", 30, true, &ann);
    table.registry.join_as_player("Alpha", "Bob", bob.clone()).unwrap();
    let session = table.registry.session("Alpha").unwrap();

    // Running
    table.registry.start_round(&ann).unwrap();
    table.registry.submit_score("3", &bob).unwrap();
    table.registry.reset_round(&ann).unwrap();
    assert_eq!(session.round_state(), RoundState::Idle);
    assert_eq!(session.score_of(&bob), None);

    // Paused
    table.registry.start_round(&ann).unwrap();
    table.registry.submit_score("3", &bob).unwrap();
    table.registry.pause_round(&ann).unwrap();
    table.registry.reset_round(&ann).unwrap();
    assert_eq!(session.round_state(), RoundState::Idle);
    assert_eq!(session.score_of(&bob), None);

    // Stopped
    table.registry.start_round(&ann).unwrap();
    table.registry.submit_score("3", &bob).unwrap();
    table.registry.stop_round(&ann).unwrap();
    assert_eq!(session.score_of(&bob), Some(Score::from("3")));
    table.registry.reset_round(&ann).unwrap();
    assert_eq!(session.round_state(), RoundState::Idle);
    assert_eq!(session.score_of(&bob), None);
}

#[test]
fn resubmission_is_last_write_wins() {
    let table = Table::new(SessionPolicy::default());
    let (ann, bob, _) = ids();
    table.create("Alpha", "Ann", 30, false, &ann);
    table.registry.join_as_player("Alpha", "Bob", bob.clone()).unwrap();
    table.registry.start_round(&ann).unwrap();

    table.registry.submit_score("3", &bob).unwrap();
    table.registry.submit_score("5", &bob).unwrap();

    let session = table.registry.resolve(&bob).unwrap();
    assert_eq!(session.score_of(&bob), Some(Score::from("5")));
    let reveal = table.notifier.last_reveal_for(&ann).unwrap();
    assert_eq!(reveal.len(), 1);
    assert_eq!(reveal[0].score, Score::from("5"));
}

#[test]
fn host_only_policy_gates_round_control() {
    let table = Table::new(SessionPolicy {
        host_only_round_control: true,
        ..SessionPolicy::default()
    });
    let (ann, bob, _) = ids();
    table.create("Alpha", "Ann", 30, false, &ann);
    table.registry.join_as_player("Alpha", "Bob", bob.clone()).unwrap();

    assert!(matches!(
        table.registry.start_round(&bob),
        Err(PokerError::NotPermitted {
            role: Role::Player,
            ..
        })
    ));
    table.registry.start_round(&ann).unwrap();
}

#[test]
fn permissive_policy_accepts_host_scores() {
    let table = Table::new(SessionPolicy::permissive());
    let (ann, _, _) = ids();
    table.create("Alpha", "Ann", 30, false, &ann);

    table.registry.submit_score("13", &ann).unwrap();
    assert_eq!(
        table.registry.resolve(&ann).unwrap().score_of(&ann),
        Some(Score::from("13"))
    );
}

#[test]
fn sessions_are_isolated_from_each_other() {
    let table = Table::new(SessionPolicy::default());
    let (ann, bea, _) = ids();
    table.create("Alpha", "Ann", 30, true, &ann);
    table.create("Beta", "Bea", 45, true, &bea);
    table.notifier.clear();

    table.registry.start_round(&ann).unwrap();

    assert!(table.notifier.events_for(&bea).is_empty());
    assert_eq!(table.registry.session_names(), vec!["Alpha", "Beta"]);
}
