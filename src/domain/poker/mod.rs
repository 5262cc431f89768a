//! Planning poker domain module.
//!
//! A [`Session`] is one team's room: who is connected and in which
//! [`Role`], where the current round is ([`RoundState`]), and which
//! [`Score`]s have been submitted. Sessions report every change as a
//! [`PokerEvent`] through the [`Notifier`](crate::ports::Notifier) port.

mod errors;
mod events;
mod participant;
mod policy;
mod round;
mod score;
mod session;

pub use errors::{Action, PokerError};
pub use events::{PokerEvent, RevealedScore, RosterEntry};
pub use participant::{Participant, Role};
pub use policy::SessionPolicy;
pub use round::RoundState;
pub use score::Score;
pub use session::{Session, SessionSnapshot};
