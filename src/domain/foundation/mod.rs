//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, the state machine trait and the
//! validation/error-code vocabulary shared by the poker domain.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::ConnectionId;
pub use state_machine::{StateMachine, TransitionError};
pub use timestamp::Timestamp;
