//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `Notifier` - Delivers session events to connected participants

mod notifier;

pub use notifier::Notifier;
