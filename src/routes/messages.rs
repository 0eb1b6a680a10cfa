use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::models::message::Message;
use crate::relay::RecipientStatus;
use crate::state::AppState;

/// POST /api/v1/message — relay one message to every recipient's live
/// gateway connections. Submit-and-await: the response reflects the
/// aggregated dispatch outcome (204 on full success, 502 with
/// per-recipient detail otherwise).
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthUser,
    Json(message): Json<Message>,
) -> Result<StatusCode, AppError> {
    state.metrics.inc_message_requests();

    if message.id.is_empty() || message.test_run_id.is_empty() {
        return Err(AppError::BadRequest(
            "message id and testRunId are required".to_string(),
        ));
    }

    // The send timestamp is assigned exactly once; keep it if the caller
    // already stamped the message.
    let message = if message.sent_at.is_none() {
        message.with_sent_at()
    } else {
        message
    };

    tracing::info!(
        test_run_id = %message.test_run_id,
        message_id = %message.id,
        sender = %user.user_id,
        recipients = message.recipients.len(),
        "relaying message"
    );

    let report = state.relay.dispatch(&message).await;
    if report.all_ok() {
        return Ok(StatusCode::NO_CONTENT);
    }

    let details: Vec<serde_json::Value> = report
        .failures()
        .map(|o| {
            let reason = match &o.status {
                RecipientStatus::Failed(code) => json!(code.as_u16()),
                RecipientStatus::Error(msg) => json!(msg),
                RecipientStatus::Ok => unreachable!("failures() filters Ok"),
            };
            json!({
                "userId": o.user_id,
                "connectionsTried": o.connections_tried,
                "reason": reason,
            })
        })
        .collect();

    Err(AppError::BadGateway(json!(details)))
}
