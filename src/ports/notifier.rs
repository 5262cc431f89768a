//! Notifier port - Interface for pushing events to connected participants.
//!
//! Sessions decide *who* hears about a change; the notifier decides *how*
//! the event reaches them (WebSocket, test recorder, ...).

use crate::domain::foundation::ConnectionId;
use crate::domain::poker::PokerEvent;

/// Port for delivering session events to connections.
///
/// Implementations must ensure:
/// - Delivery never blocks the caller (sessions notify while holding
///   their internal lock)
/// - Delivery failures are handled internally; the core does not observe them
///
/// # Example
///
/// ```ignore
/// notifier.send(&connection_id, &PokerEvent::RoundPaused);
/// notifier.broadcast(&everyone, &PokerEvent::RoundReset);
/// ```
pub trait Notifier: Send + Sync {
    /// Deliver an event to a single connection.
    fn send(&self, recipient: &ConnectionId, event: &PokerEvent);

    /// Deliver an event to every listed connection.
    fn broadcast(&self, recipients: &[ConnectionId], event: &PokerEvent) {
        for recipient in recipients {
            self.send(recipient, event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn Notifier) {}

    struct Counting(Mutex<Vec<ConnectionId>>);

    impl Notifier for Counting {
        fn send(&self, recipient: &ConnectionId, _event: &PokerEvent) {
            self.0.lock().unwrap().push(recipient.clone());
        }
    }

    #[test]
    fn default_broadcast_sends_to_each_recipient_in_order() {
        let notifier = Counting(Mutex::new(Vec::new()));
        let recipients = vec![ConnectionId::from("a"), ConnectionId::from("b")];

        notifier.broadcast(&recipients, &PokerEvent::RoundPaused);

        assert_eq!(*notifier.0.lock().unwrap(), recipients);
    }

    #[test]
    fn broadcast_to_nobody_is_noop() {
        let notifier = Counting(Mutex::new(Vec::new()));
        notifier.broadcast(&[], &PokerEvent::RoundPaused);
        assert!(notifier.0.lock().unwrap().is_empty());
    }
}
