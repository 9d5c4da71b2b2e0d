use crate::{
    message::{
        message_dto::{SendMessageRequest, SidebarResponse, SummaryResponse},
        message_handlers,
        message_models::{Message, MessageResponse},
    },
    middleware::auth_middleware,
    state::AppState,
    user::UserResponse,
    websocket::{
        types::{OnlineUsersPayload, UserStatusPayload, WsEvent},
        ws_handler,
    },
};
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        message_handlers::get_sidebar_users,
        message_handlers::get_conversation,
        message_handlers::mark_message_seen,
        message_handlers::send_message,
        message_handlers::get_chat_summary,
    ),
    components(
        schemas(
            SendMessageRequest,
            SidebarResponse,
            SummaryResponse,
            Message,
            MessageResponse,
            UserResponse,
            WsEvent,
            UserStatusPayload,
            OnlineUsersPayload,
        )
    ),
    tags(
        (name = "messages", description = "Direct messaging endpoints")
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::Http::new(
                        utoipa::openapi::security::HttpAuthScheme::Bearer,
                    ),
                ),
            )
        }
    }
}

async fn status() -> &'static str {
    "Server is live"
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Protected routes (auth required). "/:id" comes last so the fixed
    // segments match first.
    let message_routes = Router::new()
        .route("/users", get(message_handlers::get_sidebar_users))
        .route("/mark/:id", put(message_handlers::mark_message_seen))
        .route("/send/:id", post(message_handlers::send_message))
        .route("/summary/:id", get(message_handlers::get_chat_summary))
        .route("/:id", get(message_handlers::get_conversation))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let ws_routes = Router::new().route("/ws", get(ws_handler)).route_layer(
        middleware::from_fn_with_state(state.clone(), auth_middleware),
    );

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/status", get(status))
        .nest("/api/messages", message_routes)
        .merge(ws_routes)
        .layer(cors)
        .with_state(state)
}
