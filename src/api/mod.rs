pub mod routes;
pub mod models;
pub mod errors;
pub mod auth;

use std::sync::Arc;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use crate::analysis::PromptLoader;
use crate::config::PlanixConfig;
use crate::db::Database;
use crate::errors::{PlanixError, RetryConfig};
use crate::llm::{self, LLMProvider};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub llm: Arc<dyn LLMProvider>,
    pub prompts: Arc<PromptLoader>,
    pub retry: RetryConfig,
}

impl AppState {
    pub fn new(db: Database, llm: Arc<dyn LLMProvider>) -> Self {
        Self {
            db,
            llm,
            prompts: Arc::new(PromptLoader::default()),
            retry: RetryConfig::default(),
        }
    }
}

/// Open the database and resolve the provider (and its model) once.
pub async fn create_app_state(config: &PlanixConfig) -> Result<AppState, PlanixError> {
    let db = Database::new(&config.db_path())?;
    let llm_config = config.llm();
    let llm = llm::resolve_provider(&llm_config).await?;

    Ok(AppState {
        db,
        llm,
        prompts: Arc::new(PromptLoader::new(llm_config.prompts_dir.clone().map(Into::into))),
        retry: RetryConfig {
            max_retries: llm_config.max_retries(),
            ..RetryConfig::default()
        },
    })
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/projects", get(routes::projects::list_projects).post(routes::projects::create_project))
        .route("/api/projects/{id}", get(routes::projects::get_project))
        .route(
            "/api/projects/{id}/analyses",
            post(routes::analyses::create_analysis).get(routes::analyses::list_analyses),
        )
        .route("/api/projects/{id}/export.zip", get(routes::exports::export_project_zip))
        .route("/api/analyses/{id}", get(routes::analyses::get_analysis))
        .route("/api/analyses/{id}/export.md", get(routes::exports::export_markdown))
        .route("/api/analyses/{id}/export.txt", get(routes::exports::export_text))
        .route("/api/analyses/{id}/export.pdf", get(routes::exports::export_pdf))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_owner));

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
