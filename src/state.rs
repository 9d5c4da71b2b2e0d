use crate::db::DbPool;
use crate::message::message_service::ChatService;
use crate::user::user_repository::UserRepository;
use crate::websocket::PresenceRegistry;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: Arc<Config>,
    pub presence: PresenceRegistry,
    pub user_repository: UserRepository,
    pub chat_service: ChatService,
}

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub media_upload_url: String,
    pub media_upload_preset: Option<String>,
    pub summary_window: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: std::env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set"),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .expect("GEMINI_API_KEY must be set"),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-1.5-flash".to_string()),
            media_upload_url: std::env::var("MEDIA_UPLOAD_URL")
                .expect("MEDIA_UPLOAD_URL must be set"),
            media_upload_preset: std::env::var("MEDIA_UPLOAD_PRESET").ok(),
            summary_window: std::env::var("SUMMARY_WINDOW")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .expect("SUMMARY_WINDOW must be a number"),
        }
    }
}
