//! In-memory notifier that records every delivery.
//!
//! Provides deterministic, inspectable delivery for unit and integration
//! tests.
//!
//! # Security Note
//!
//! This adapter is for **testing only** and should not be used in production.
//! It uses `.expect()` on lock operations which will panic if locks are poisoned.

use std::sync::Mutex;

use crate::domain::foundation::ConnectionId;
use crate::domain::poker::{PokerEvent, RevealedScore, RosterEntry};
use crate::ports::Notifier;

/// A single event delivered to a single connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub recipient: ConnectionId,
    pub event: PokerEvent,
}

/// Notifier that stores deliveries for later assertions.
///
/// # Example
///
/// ```ignore
/// let notifier = Arc::new(RecordingNotifier::new());
/// let registry = SessionRegistry::new(notifier.clone(), SessionPolicy::default());
///
/// registry.start_round(&host)?;
/// assert!(notifier.has_event("round_started"));
/// ```
pub struct RecordingNotifier {
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            deliveries: Mutex::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Returns every delivery in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries
            .lock()
            .expect("RecordingNotifier: lock poisoned")
            .clone()
    }

    /// Returns the events delivered to one connection, in order.
    pub fn events_for(&self, recipient: &ConnectionId) -> Vec<PokerEvent> {
        self.deliveries()
            .into_iter()
            .filter(|d| &d.recipient == recipient)
            .map(|d| d.event)
            .collect()
    }

    /// Returns deliveries whose event has the given kind.
    pub fn deliveries_of_kind(&self, kind: &str) -> Vec<Delivery> {
        self.deliveries()
            .into_iter()
            .filter(|d| d.event.kind() == kind)
            .collect()
    }

    /// Checks if an event of the given kind was delivered to anyone.
    pub fn has_event(&self, kind: &str) -> bool {
        self.deliveries().iter().any(|d| d.event.kind() == kind)
    }

    /// Returns the most recent roster delivered to a connection.
    pub fn last_roster_for(&self, recipient: &ConnectionId) -> Option<Vec<RosterEntry>> {
        self.events_for(recipient)
            .into_iter()
            .rev()
            .find_map(|event| match event {
                PokerEvent::RosterChanged { roster } => Some(roster),
                _ => None,
            })
    }

    /// Returns the most recent reveal delivered to a connection.
    pub fn last_reveal_for(&self, recipient: &ConnectionId) -> Option<Vec<RevealedScore>> {
        self.events_for(recipient)
            .into_iter()
            .rev()
            .find_map(|event| match event {
                PokerEvent::ScoresRevealed { scores } => Some(scores),
                _ => None,
            })
    }

    /// Returns count of deliveries.
    pub fn count(&self) -> usize {
        self.deliveries
            .lock()
            .expect("RecordingNotifier: lock poisoned")
            .len()
    }

    /// Clears all recorded deliveries (for test isolation).
    pub fn clear(&self) {
        self.deliveries
            .lock()
            .expect("RecordingNotifier: lock poisoned")
            .clear();
    }
}

impl Default for RecordingNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, recipient: &ConnectionId, event: &PokerEvent) {
        self.deliveries
            .lock()
            .expect("RecordingNotifier: lock poisoned")
            .push(Delivery {
                recipient: recipient.clone(),
                event: event.clone(),
            });
    }
}
