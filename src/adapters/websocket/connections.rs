//! Outbound channels for connected WebSocket clients.
//!
//! Each socket registers a bounded channel; the socket's send task drains
//! it. Sessions reach clients through the [`Notifier`] implementation here,
//! which never waits: a full or closed channel drops the message.
//!
//! ```text
//! Session ──notify──▶ ConnectionHub ──try_send──▶ [conn-a queue] ──▶ socket a
//!                                   └─try_send──▶ [conn-b queue] ──▶ socket b
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::foundation::ConnectionId;
use crate::domain::poker::PokerEvent;
use crate::ports::Notifier;

use super::messages::ServerMessage;

/// Registry of per-connection outbound queues.
///
/// # Thread Safety
///
/// Uses a std `RwLock` because delivery happens from synchronous domain
/// code; deliveries (reads) vastly outnumber connects/disconnects (writes).
pub struct ConnectionHub {
    channels: RwLock<HashMap<ConnectionId, mpsc::Sender<ServerMessage>>>,
    /// Queue capacity for each connection.
    capacity: usize,
}

impl ConnectionHub {
    /// Create a hub whose per-connection queues hold `capacity` messages.
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Create with default capacity (64 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(64)
    }

    /// Register a connection and return the receiver its socket drains.
    ///
    /// Registering an ID twice replaces the previous queue.
    pub fn register(&self, connection_id: ConnectionId) -> mpsc::Receiver<ServerMessage> {
        let (tx, rx) = mpsc::channel(self.capacity);
        self.channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(connection_id, tx);
        rx
    }

    /// Drop a connection's queue.
    pub fn unregister(&self, connection_id: &ConnectionId) {
        self.channels
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(connection_id);
    }

    /// Queue a message for one connection without waiting.
    ///
    /// Returns false if the message was dropped.
    pub fn deliver(&self, connection_id: &ConnectionId, message: ServerMessage) -> bool {
        let channels = self.channels.read().unwrap_or_else(PoisonError::into_inner);
        let Some(sender) = channels.get(connection_id) else {
            tracing::trace!(connection_id = %connection_id, "No channel for connection");
            return false;
        };

        match sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!(
                    connection_id = %connection_id,
                    capacity = self.capacity,
                    "Outbound queue full, dropping message"
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::debug!(connection_id = %connection_id, "Outbound queue closed");
                false
            }
        }
    }

    pub fn is_registered(&self, connection_id: &ConnectionId) -> bool {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(connection_id)
    }

    pub fn connection_count(&self) -> usize {
        self.channels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for ConnectionHub {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl Notifier for ConnectionHub {
    fn send(&self, recipient: &ConnectionId, event: &PokerEvent) {
        self.deliver(recipient, ServerMessage::Event(event.clone()));
    }
}
