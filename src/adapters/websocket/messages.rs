//! WebSocket message types for planning poker clients.
//!
//! Defines the protocol between server and connected clients:
//! - Server → Client: session events, connection status, errors, pongs
//! - Client → Server: session commands and pings

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConnectionId, ErrorCode, Timestamp};
use crate::domain::poker::{PokerError, PokerEvent};

// ============================================
// Server → Client Messages
// ============================================

/// Everything that can be queued for delivery to one client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    /// Session event produced by the domain.
    Event(PokerEvent),

    /// Connection-level message produced by the transport.
    Control(ControlMessage),
}

/// Connection-level messages.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ControlMessage {
    /// Socket accepted; tells the client its connection ID.
    Connected { connection_id: ConnectionId },

    /// Command rejected.
    Error { code: String, message: String },

    /// Heartbeat response.
    Pong,
}

impl ServerMessage {
    pub fn connected(connection_id: ConnectionId) -> Self {
        ServerMessage::Control(ControlMessage::Connected { connection_id })
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMessage::Control(ControlMessage::Error {
            code: code.to_string(),
            message: message.into(),
        })
    }

    pub fn pong() -> Self {
        ServerMessage::Control(ControlMessage::Pong)
    }

    /// Stamp the message with the send time for the wire.
    pub fn into_frame(self) -> OutboundFrame {
        OutboundFrame {
            message: self,
            timestamp: Timestamp::now().to_rfc3339(),
        }
    }
}

impl From<PokerEvent> for ServerMessage {
    fn from(event: PokerEvent) -> Self {
        ServerMessage::Event(event)
    }
}

impl From<&PokerError> for ServerMessage {
    fn from(err: &PokerError) -> Self {
        ServerMessage::error(err.code(), err.to_string())
    }
}

/// Exact JSON object written to the socket.
#[derive(Debug, Clone, Serialize)]
pub struct OutboundFrame {
    #[serde(flatten)]
    pub message: ServerMessage,
    pub timestamp: String,
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    CreateSession {
        name: String,
        display_name: String,
        round_duration: u32,
        #[serde(default)]
        participating: bool,
    },
    JoinAsPlayer {
        name: String,
        display_name: String,
    },
    JoinAsViewer {
        name: String,
        display_name: String,
    },
    SubmitScore {
        score: String,
    },
    StartRound,
    PauseRound,
    StopRound,
    ResetRound,
    Leave,
    /// Heartbeat request.
    Ping,
}
