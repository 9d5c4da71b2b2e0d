use crate::message::message_models::Message;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Server-to-client events. `NewMessage` carries the full persisted record
/// so an open client can render it without a follow-up fetch. `OnlineUsers`
/// seeds a fresh connection with the current roster; `UserStatus` keeps it
/// current incrementally.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsEvent {
    NewMessage(Message),
    UserStatus(UserStatusPayload),
    OnlineUsers(OnlineUsersPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserStatusPayload {
    pub user_id: Uuid,
    pub is_online: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OnlineUsersPayload {
    pub user_ids: Vec<Uuid>,
}
