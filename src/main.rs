use quickchat::db::{create_pool, run_migrations};
use quickchat::media::HttpMediaStore;
use quickchat::message::{ChatService, MessageRepository};
use quickchat::routes::create_router;
use quickchat::state::{AppState, Config};
use quickchat::summary::GeminiClient;
use quickchat::user::UserRepository;
use quickchat::websocket::PresenceRegistry;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,quickchat=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env());

    // Create database connection pool
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = create_pool(&database_url).await?;

    // Run migrations
    tracing::info!("Running migrations...");
    run_migrations(&db).await?;

    // Track live websocket connections
    let presence = PresenceRegistry::new();

    // Create repositories
    let user_repository = UserRepository::new(db.clone());
    let message_repository = Arc::new(MessageRepository::new(db.clone()));

    // External collaborators
    let media_store = Arc::new(HttpMediaStore::new(
        config.media_upload_url.clone(),
        config.media_upload_preset.clone(),
    ));
    let summarizer = Arc::new(GeminiClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
    ));

    // Create services
    let chat_service = ChatService::new(
        message_repository,
        media_store,
        summarizer,
        presence.clone(),
        config.summary_window,
    );

    // Create application state
    let state = AppState {
        db: db.clone(),
        config: config.clone(),
        presence,
        user_repository,
        chat_service,
    };

    // Create router
    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
