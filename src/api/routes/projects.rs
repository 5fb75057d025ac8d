use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Value};
use crate::api::AppState;
use crate::api::auth::Owner;
use crate::api::errors::api_error;
use crate::api::models::CreateProjectRequest;
use crate::errors::PlanixError;
use crate::models::Project;
use tracing::info;

pub(crate) fn owned_project(state: &AppState, owner: &Owner, id: &str) -> Result<Project, (StatusCode, Json<Value>)> {
    state.db.get_project(&owner.0, id)
        .map_err(api_error)?
        .ok_or_else(|| api_error(PlanixError::NotFound("Project".into())))
}

pub async fn create_project(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Json(req): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let draft = req.into_draft().map_err(api_error)?;
    let project = state.db.create_project(&owner.0, draft).map_err(api_error)?;
    info!(project_id = %project.id, name = %project.name, "Project created");
    Ok((StatusCode::CREATED, Json(json!(project))))
}

/// Dashboard: the caller's projects, newest first.
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let projects = state.db.list_projects(&owner.0).map_err(api_error)?;
    Ok(Json(json!({ "projects": projects, "total": projects.len() })))
}

pub async fn get_project(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let project = owned_project(&state, &owner, &id)?;
    Ok(Json(json!({
        "project": project,
        "platform_label": project.platform.label(),
    })))
}
