//! WebSocket upgrade handler for planning poker clients.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Assign a connection ID and register its outbound queue
//! 2. Forward queued messages to the socket
//! 3. Map each client command onto a registry operation
//! 4. On disconnect, leave the session and drop the queue

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::{IntoResponse, Response},
    Json,
};
use futures::{SinkExt, StreamExt};
use serde_json::json;
use tokio::sync::mpsc;

use crate::application::{CreateSessionCommand, SessionRegistry};
use crate::domain::foundation::{ConnectionId, ErrorCode};
use crate::domain::poker::PokerError;

use super::{
    connections::ConnectionHub,
    messages::{ClientMessage, ServerMessage},
};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    pub registry: Arc<SessionRegistry>,
    pub hub: Arc<ConnectionHub>,
}

impl WebSocketState {
    pub fn new(registry: Arc<SessionRegistry>, hub: Arc<ConnectionHub>) -> Self {
        Self { registry, hub }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Liveness probe with a session count.
///
/// Route: `GET /health`
pub async fn health_handler(State(state): State<WebSocketState>) -> Response {
    Json(json!({
        "status": "ok",
        "sessions": state.registry.session_count(),
        "connections": state.hub.connection_count(),
    }))
    .into_response()
}

/// Handle an established WebSocket connection.
///
/// Runs for the lifetime of the connection.
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (mut sender, mut receiver) = socket.split();

    let connection_id = ConnectionId::generate();
    let mut outbound: mpsc::Receiver<ServerMessage> = state.hub.register(connection_id.clone());
    tracing::debug!(connection_id = %connection_id, "Client connected");

    state
        .hub
        .deliver(&connection_id, ServerMessage::connected(connection_id.clone()));

    // Forward queued messages to the client.
    let mut send_task = {
        let connection_id = connection_id.clone();
        tokio::spawn(async move {
            while let Some(message) = outbound.recv().await {
                if let Err(e) = send_message(&mut sender, message).await {
                    tracing::debug!(
                        connection_id = %connection_id,
                        "Send error, closing connection: {}",
                        e
                    );
                    break;
                }
            }
        })
    };

    // Handle incoming commands from the client.
    let mut recv_task = {
        let connection_id = connection_id.clone();
        let state = state.clone();
        tokio::spawn(async move {
            while let Some(result) = receiver.next().await {
                match result {
                    Ok(Message::Text(text)) => {
                        let reply = match serde_json::from_str::<ClientMessage>(&text) {
                            Ok(command) => dispatch(&state.registry, &connection_id, command),
                            Err(e) => {
                                tracing::debug!(
                                    connection_id = %connection_id,
                                    "Unparseable client message: {}",
                                    e
                                );
                                Some(ServerMessage::error(ErrorCode::InvalidMessage, e.to_string()))
                            }
                        };
                        if let Some(reply) = reply {
                            state.hub.deliver(&connection_id, reply);
                        }
                    }
                    Ok(Message::Binary(_)) => {
                        tracing::warn!(
                            connection_id = %connection_id,
                            "Received unsupported binary message"
                        );
                    }
                    Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                        // WebSocket protocol ping/pong - handled automatically by axum
                    }
                    Ok(Message::Close(_)) => {
                        tracing::debug!(connection_id = %connection_id, "Client sent close frame");
                        break;
                    }
                    Err(e) => {
                        tracing::debug!(connection_id = %connection_id, "Receive error: {}", e);
                        break;
                    }
                }
            }
        })
    };

    // Wait for either task to finish
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.registry.leave(&connection_id);
    state.hub.unregister(&connection_id);
    tracing::debug!(connection_id = %connection_id, "Client disconnected");
}

/// Apply one client command to the registry.
///
/// Returns the direct reply for the sender, if any. Session events reach
/// participants through the notifier, not through this return value.
pub fn dispatch(
    registry: &SessionRegistry,
    connection_id: &ConnectionId,
    command: ClientMessage,
) -> Option<ServerMessage> {
    let result: Result<(), PokerError> = match command {
        ClientMessage::CreateSession {
            name,
            display_name,
            round_duration,
            participating,
        } => registry.create_session(
            CreateSessionCommand {
                name,
                host_display_name: display_name,
                round_duration_secs: round_duration,
                participating,
            },
            connection_id.clone(),
        ),
        ClientMessage::JoinAsPlayer { name, display_name } => {
            registry.join_as_player(&name, &display_name, connection_id.clone())
        }
        ClientMessage::JoinAsViewer { name, display_name } => {
            registry.join_as_viewer(&name, &display_name, connection_id.clone())
        }
        ClientMessage::SubmitScore { score } => registry.submit_score(score, connection_id),
        ClientMessage::StartRound => registry.start_round(connection_id),
        ClientMessage::PauseRound => registry.pause_round(connection_id),
        ClientMessage::StopRound => registry.stop_round(connection_id),
        ClientMessage::ResetRound => registry.reset_round(connection_id),
        ClientMessage::Leave => {
            registry.leave(connection_id);
            Ok(())
        }
        ClientMessage::Ping => {
            tracing::trace!(connection_id = %connection_id, "Received ping");
            return Some(ServerMessage::pong());
        }
    };

    match result {
        Ok(()) => None,
        Err(err) => {
            tracing::debug!(
                connection_id = %connection_id,
                code = %err.code(),
                "Command rejected: {}",
                err
            );
            Some(ServerMessage::from(&err))
        }
    }
}

/// Send a JSON frame over the WebSocket.
async fn send_message(
    sender: &mut futures::stream::SplitSink<WebSocket, Message>,
    message: ServerMessage,
) -> Result<(), axum::Error> {
    let json = serde_json::to_string(&message.into_frame()).map_err(axum::Error::new)?;
    sender.send(Message::Text(json)).await
}

/// Create axum router for the WebSocket and health endpoints.
///
/// # Example
///
/// ```ignore
/// let app = websocket_router().with_state(WebSocketState::new(registry, hub));
/// ```
pub fn websocket_router() -> axum::Router<WebSocketState> {
    use axum::routing::get;

    axum::Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health_handler))
}
