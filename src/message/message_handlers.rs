use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, Result},
    message::{
        message_dto::{SendMessageRequest, SidebarResponse, SummaryResponse},
        message_models::MessageResponse,
    },
    middleware::AuthUser,
    state::AppState,
    user::user_models::UserResponse,
};

/// List conversation partners with their unseen-message counts
#[utoipa::path(
    get,
    path = "/api/messages/users",
    tag = "messages",
    responses(
        (status = 200, description = "Users and sparse unseen counts", body = SidebarResponse),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_sidebar_users(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<impl IntoResponse> {
    let users = state.user_repository.find_all_except(user_id).await?;
    let candidate_ids: Vec<Uuid> = users.iter().map(|u| u.id).collect();

    let unseen_counts = state
        .chat_service
        .unseen_counts(user_id, &candidate_ids)
        .await?;

    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok((StatusCode::OK, Json(SidebarResponse { users, unseen_counts })))
}

/// Get the full conversation with another user; their messages to the
/// caller are marked seen as a side effect
#[utoipa::path(
    get,
    path = "/api/messages/{id}",
    tag = "messages",
    params(
        ("id" = Uuid, Path, description = "Counterpart user id")
    ),
    responses(
        (status = 200, description = "Messages in ascending creation order", body = Vec<MessageResponse>),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_conversation(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(other_user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let messages = state
        .chat_service
        .open_conversation(user_id, other_user_id)
        .await?;

    let messages: Vec<MessageResponse> = messages.into_iter().map(MessageResponse::from).collect();

    Ok((StatusCode::OK, Json(messages)))
}

/// Mark a single message as seen
#[utoipa::path(
    put,
    path = "/api/messages/mark/{id}",
    tag = "messages",
    params(
        ("id" = Uuid, Path, description = "Message id")
    ),
    responses(
        (status = 200, description = "Message marked seen"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Message not found")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn mark_message_seen(
    State(state): State<AppState>,
    AuthUser(_user_id): AuthUser,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.chat_service.mark_seen(message_id).await?;

    Ok(StatusCode::OK)
}

/// Send a message to another user, with optional text and optional image
#[utoipa::path(
    post,
    path = "/api/messages/send/{id}",
    tag = "messages",
    params(
        ("id" = Uuid, Path, description = "Receiver user id")
    ),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message persisted", body = MessageResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Receiver not found"),
        (status = 502, description = "Media store failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    AuthUser(sender_id): AuthUser,
    Path(receiver_id): Path<Uuid>,
    Json(payload): Json<SendMessageRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    // Verify receiver exists
    let _receiver = state
        .user_repository
        .find_by_id(receiver_id)
        .await?
        .ok_or(AppError::NotFound("Receiver not found".to_string()))?;

    let message = state
        .chat_service
        .send_message(sender_id, receiver_id, payload)
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(message))))
}

/// Summarize the conversation with another user
#[utoipa::path(
    get,
    path = "/api/messages/summary/{id}",
    tag = "messages",
    params(
        ("id" = Uuid, Path, description = "Counterpart user id")
    ),
    responses(
        (status = 200, description = "Free-form summary text", body = SummaryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 502, description = "Summarization engine failure")
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_chat_summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(other_user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let summary = state
        .chat_service
        .summarize_conversation(user_id, other_user_id)
        .await?;

    Ok((StatusCode::OK, Json(SummaryResponse { summary })))
}
