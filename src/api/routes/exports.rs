use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde_json::Value;
use crate::api::AppState;
use crate::api::auth::Owner;
use crate::api::errors::api_error;
use crate::reporting::{archive_name, build_archive, render_pdf, render_text, EMPTY_ARCHIVE_MESSAGE};
use super::analyses::owned_analysis;
use super::projects::owned_project;
use tracing::info;

fn attachment(content_type: &'static str, filename: String, body: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, format!("attachment; filename={}", filename)),
        ],
        body,
    ).into_response()
}

enum Format {
    Markdown,
    Text,
    Pdf,
}

async fn export_single(
    state: AppState,
    owner: Owner,
    id: String,
    format: Format,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let analysis = owned_analysis(&state, &owner, &id)?;
    let project = owned_project(&state, &owner, &analysis.project_id)?;

    let response = match format {
        Format::Markdown => attachment(
            "text/markdown",
            format!("analysis_{}.md", analysis.id),
            render_text(&analysis, &project.name).into_bytes(),
        ),
        Format::Text => attachment(
            "text/plain",
            format!("analysis_{}.txt", analysis.id),
            render_text(&analysis, &project.name).into_bytes(),
        ),
        Format::Pdf => attachment(
            "application/pdf",
            format!("analysis_{}.pdf", analysis.id),
            render_pdf(&analysis, &project.name).map_err(api_error)?,
        ),
    };
    info!(analysis_id = %analysis.id, "Analysis exported");
    Ok(response)
}

pub async fn export_markdown(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    export_single(state, owner, id, Format::Markdown).await
}

pub async fn export_text(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    export_single(state, owner, id, Format::Text).await
}

pub async fn export_pdf(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(id): Path<String>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    export_single(state, owner, id, Format::Pdf).await
}

/// All of a project's analyses as one zip, oldest first.
pub async fn export_project_zip(
    State(state): State<AppState>,
    Extension(owner): Extension<Owner>,
    Path(project_id): Path<String>,
) -> Result<Response, (StatusCode, Json<Value>)> {
    let project = owned_project(&state, &owner, &project_id)?;
    let analyses = state.db.list_analyses(&owner.0, &project.id, false).map_err(api_error)?;

    if analyses.is_empty() {
        return Ok(([(header::CONTENT_TYPE, "text/plain")], EMPTY_ARCHIVE_MESSAGE).into_response());
    }

    let bytes = build_archive(&project.name, &analyses).map_err(api_error)?;
    info!(project_id = %project.id, entries = analyses.len(), "Analysis history exported");
    Ok(attachment("application/zip", archive_name(&project.name), bytes))
}
