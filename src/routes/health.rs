use axum::extract::State;
use axum::Json;

use crate::metrics::MetricsSnapshot;
use crate::middleware::auth::AuthUser;
use crate::models::DataResponse;
use crate::state::AppState;

pub async fn health() -> &'static str {
    "ok"
}

pub async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "git_sha": env!("GIT_SHA"),
    }))
}

pub async fn stats(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Json<DataResponse<MetricsSnapshot>> {
    Json(DataResponse::new(state.metrics.snapshot()))
}
