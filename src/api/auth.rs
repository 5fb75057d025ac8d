use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
    Json,
};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::api::errors::api_error;
use tracing::debug;

/// Id of the authenticated caller, inserted by [`require_owner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner(pub String);

fn bearer_token(request: &Request) -> Option<&str> {
    request.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub async fn require_owner(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let Some(token) = bearer_token(&request) else {
        return Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "Missing Authorization header"}))));
    };

    let user = state.db.user_by_token(token).map_err(api_error)?;
    match user {
        Some(user) => {
            debug!(user = %user.username, path = %request.uri().path(), "Authenticated request");
            request.extensions_mut().insert(Owner(user.id));
            Ok(next.run(request).await)
        }
        None => Err((StatusCode::UNAUTHORIZED, Json(json!({"error": "Invalid API token"})))),
    }
}
