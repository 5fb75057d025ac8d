use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use crate::errors::PlanixError;
use tracing::error;

pub fn status_for(e: &PlanixError) -> StatusCode {
    match e {
        PlanixError::Config(_) | PlanixError::Validation(_) => StatusCode::BAD_REQUEST,
        PlanixError::Authentication(_) => StatusCode::UNAUTHORIZED,
        PlanixError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handler error shape: status plus `{"error": ...}`.
pub fn api_error(e: PlanixError) -> (StatusCode, Json<Value>) {
    let status = status_for(&e);
    if status.is_server_error() {
        error!(error = %e, "Request failed");
    }
    (status, Json(json!({"error": e.to_string()})))
}

impl IntoResponse for PlanixError {
    fn into_response(self) -> axum::response::Response {
        api_error(self).into_response()
    }
}
