//! Planning Poker - real-time estimation sessions
//!
//! This crate tracks planning poker sessions: who is connected to which
//! team room, what role they play, where the current round stands and
//! which estimates have been submitted.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
