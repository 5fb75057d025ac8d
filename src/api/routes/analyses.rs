use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use crate::analysis::{generate_analysis, trend_for};
use crate::api::AppState;
use crate::api::auth::Owner;
use crate::api::errors::api_error;
use crate::errors::PlanixError;
use crate::models::Analysis;
use super::projects::owned_project;

pub(crate) fn owned_analysis(state: &AppState, owner: &Owner, id: &str) -> Result<Analysis, (StatusCode, Json<Value>)> {
    state.db.get_analysis(&owner.0, id)
        .map_err(api_error)?
        .ok_or_else(|| api_error(PlanixError::NotFound("Analysis".into())))
}

/// Generate, score and store one analysis. Provider failures still yield a
/// stored record with whatever could be computed.
pub async fn create_analysis(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(project_id): Path<String>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let project = owned_project(&state, &owner, &project_id)?;
    let id = uuid::Uuid::new_v4().to_string();

    let generated = generate_analysis(
        state.llm.as_ref(),
        &state.prompts,
        &state.retry,
        &project,
        &id,
        Utc::now(),
    ).await;

    state.db.insert_analysis(&generated.analysis).map_err(api_error)?;

    Ok((StatusCode::CREATED, Json(json!({
        "analysis": generated.analysis,
        "score": generated.score,
    }))))
}

/// History view: newest first, with the score trend.
pub async fn list_analyses(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(project_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let project = owned_project(&state, &owner, &project_id)?;
    let analyses = state.db.list_analyses(&owner.0, &project.id, true).map_err(api_error)?;
    let trend = trend_for(&analyses);

    Ok(Json(json!({
        "project": project,
        "analyses": analyses,
        "trend": trend,
    })))
}

pub async fn get_analysis(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let analysis = owned_analysis(&state, &owner, &id)?;
    let project = owned_project(&state, &owner, &analysis.project_id)?;
    Ok(Json(json!({
        "analysis": analysis,
        "project": { "id": project.id, "name": project.name },
    })))
}
