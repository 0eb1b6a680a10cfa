use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use data_encoding::BASE64;
use serde_json::json;

use crate::state::AppState;
use crate::users::UserDirectory;

/// The authenticated caller, resolved from HTTP Basic credentials
/// against the configured user directory.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
}

/// Parse `Authorization: Basic <base64(user:pass)>` into its parts.
fn parse_basic_header(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim().as_bytes()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn resolve_basic_auth(users: &UserDirectory, header: &str) -> Option<AuthUser> {
    let (username, password) = parse_basic_header(header)?;
    if users.verify(&username, &password) {
        Some(AuthUser { user_id: username })
    } else {
        None
    }
}

/// Rejection type for when auth fails. Carries the `WWW-Authenticate`
/// challenge so plain HTTP clients can prompt for credentials.
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = json!({
            "error": {
                "code": "unauthorized",
                "message": "invalid or missing credentials"
            }
        });
        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        response
            .headers_mut()
            .insert("WWW-Authenticate", "Basic".parse().expect("static header"));
        response
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthRejection;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let users = state.users.clone();
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        async move {
            auth_header
                .and_then(|header| resolve_basic_auth(&users, &header))
                .ok_or(AuthRejection)
        }
    }
}
