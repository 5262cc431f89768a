//! Application layer - the registry every connection handler talks to.
//!
//! Resolves connections to sessions and owns session lifecycle; the
//! round and membership rules themselves live in the domain.

mod session_registry;

pub use session_registry::{CreateSessionCommand, SessionRegistry};
