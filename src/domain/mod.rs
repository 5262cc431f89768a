//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `poker` - Sessions, participants, rounds and scores

pub mod foundation;
pub mod poker;
