use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::user::user_models::UserResponse;

/// Base64 data URIs grow ~4/3 over the raw bytes; the derive below bounds
/// uploads to roughly 5 MiB of image data.
pub const MAX_IMAGE_PAYLOAD_CHARS: usize = 7_000_000;

/// Body of a send request. Neither field is required on its own; the store
/// accepts a message as long as the identifiers are valid.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SendMessageRequest {
    pub text: Option<String>,
    /// Raw image as a base64 data URI, uploaded to the media store before
    /// the message is persisted.
    #[validate(length(max = 7_000_000, message = "image payload too large"))]
    pub image: Option<String>,
}

/// Sidebar payload: every other user plus a sparse unseen-count map. A user
/// with nothing unseen has no entry at all.
#[derive(Debug, Serialize, ToSchema)]
pub struct SidebarResponse {
    pub users: Vec<UserResponse>,
    pub unseen_counts: HashMap<Uuid, i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryResponse {
    pub summary: String,
}
