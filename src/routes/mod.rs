mod connections;
mod health;
mod messages;
mod users;

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router. `/health` and `/version` are open;
/// everything under `/api/v1` requires Basic auth via the `AuthUser`
/// extractor on each handler.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/version", get(health::version))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Message relay
        .route("/message", post(messages::send_message))
        // Connection registration (called by the gateway)
        .route(
            "/connections/{user_id}",
            get(connections::list_connections),
        )
        .route(
            "/connections/{user_id}/{conn_id}",
            put(connections::register).delete(connections::deregister),
        )
        // User directory
        .route("/user", get(users::current_user))
        .route("/users", get(users::list_users))
        // Metrics counters
        .route("/stats", get(health::stats))
}
