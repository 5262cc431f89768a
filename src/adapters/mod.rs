//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `notifier` - In-memory notifier for tests
//! - `websocket` - WebSocket transport; `ConnectionHub` is the production notifier

pub mod notifier;
pub mod websocket;

pub use notifier::{Delivery, RecordingNotifier};
pub use websocket::{ConnectionHub, WebSocketState};
