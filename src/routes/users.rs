use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::user::UserInfo;
use crate::models::{DataResponse, ListResponse};
use crate::state::AppState;

/// GET /api/v1/user — the authenticated caller's directory entry.
pub async fn current_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<DataResponse<UserInfo>>, AppError> {
    let info = state
        .users
        .get(&user.user_id)
        .ok_or_else(|| AppError::Internal(format!("authenticated user {} not in directory", user.user_id)))?;
    Ok(Json(DataResponse::new(info)))
}

/// GET /api/v1/users — every user the harness knows about.
pub async fn list_users(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Json<ListResponse<UserInfo>> {
    Json(ListResponse::new(state.users.list()))
}
