use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::ListResponse;
use crate::state::AppState;

/// PUT /api/v1/connections/{user_id}/{conn_id} — the gateway registers a
/// connection it just accepted for a user.
pub async fn register(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((user_id, conn_id)): Path<(String, String)>,
) -> StatusCode {
    tracing::debug!(user_id, conn_id, "registering gateway connection");
    state.conntrack.add(&user_id, &conn_id);
    StatusCode::NO_CONTENT
}

/// DELETE /api/v1/connections/{user_id}/{conn_id} — the gateway reports a
/// connection as closed. 404 if the user was never tracked.
pub async fn deregister(
    State(state): State<AppState>,
    _user: AuthUser,
    Path((user_id, conn_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(user_id, conn_id, "deregistering gateway connection");
    if state.conntrack.remove(&user_id, &conn_id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!(
            "no connections tracked for user {user_id}"
        )))
    }
}

/// GET /api/v1/connections/{user_id} — current snapshot of a user's
/// tracked connection ids, for test assertions.
pub async fn list_connections(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(user_id): Path<String>,
) -> Json<ListResponse<String>> {
    Json(ListResponse::new(state.conntrack.list(&user_id)))
}
