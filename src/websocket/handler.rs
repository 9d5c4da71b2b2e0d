use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::{
    middleware::AuthUser,
    state::AppState,
    websocket::types::{OnlineUsersPayload, UserStatusPayload, WsEvent},
};

/// WebSocket upgrade handler. The channel is push-only: sending a message
/// happens over HTTP, the socket exists so the server can deliver events.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, user_id, state))
}

async fn handle_socket(socket: WebSocket, user_id: Uuid, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<WsEvent>();

    // Register the delivery channel before anything can be pushed at it.
    state.presence.add_connection(user_id, tx);
    tracing::debug!("{} users online", state.presence.online_count());

    // Seed the fresh connection with the current roster, then announce the
    // change to everyone else incrementally.
    let roster = WsEvent::OnlineUsers(OnlineUsersPayload {
        user_ids: state.presence.online_users(),
    });
    state.presence.send_to_user(&user_id, roster);

    let online_status = WsEvent::UserStatus(UserStatusPayload {
        user_id,
        is_online: true,
    });
    state.presence.broadcast(online_status);

    // Pump queued events out to the socket.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&event) {
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
        }
    });

    // The read half only tracks liveness; inbound frames are not commands.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.presence.remove_connection(&user_id);
    let offline_status = WsEvent::UserStatus(UserStatusPayload {
        user_id,
        is_online: false,
    });
    state.presence.broadcast(offline_status);

    tracing::info!("WebSocket connection closed for user {}", user_id);
}
