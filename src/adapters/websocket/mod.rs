//! WebSocket adapter - the real-time transport for planning poker clients.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  ClientMessage   ┌──────────────────┐
//! │  WebSocket   │ ───────────────▶ │ dispatch()       │
//! │  (per conn)  │                  │ SessionRegistry  │
//! └──────────────┘                  └──────────────────┘
//!        ▲                                   │ Session → Notifier
//!        │ ServerMessage                     ▼
//! ┌──────────────┐                  ┌──────────────────┐
//! │ send task    │ ◀── mpsc queue ─ │  ConnectionHub   │
//! └──────────────┘                  └──────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`connections`] - Per-connection outbound queues; the production `Notifier`
//! - [`handler`] - Axum WebSocket upgrade handler and command dispatch

pub mod connections;
pub mod handler;
pub mod messages;

pub use connections::ConnectionHub;
pub use handler::{dispatch, websocket_router, ws_handler, WebSocketState};
pub use messages::{ClientMessage, ControlMessage, OutboundFrame, ServerMessage};
