use crate::cli::commands::ServeArgs;
use crate::cli::{apply_llm_overrides, load_config};
use crate::config::{DatabaseConfig, ServerConfig};
use crate::errors::PlanixError;
use crate::api;
use tracing::info;

pub async fn handle_serve(args: ServeArgs) -> Result<(), PlanixError> {
    let mut config = load_config(args.config.as_deref()).await?;
    apply_llm_overrides(&mut config, &args.llm);

    let server = config.server.get_or_insert_with(ServerConfig::default);
    if let Some(host) = args.host {
        server.host = Some(host);
    }
    if let Some(port) = args.port {
        server.port = Some(port);
    }
    if let Some(db) = args.db {
        config.database.get_or_insert_with(DatabaseConfig::default).path = Some(db);
    }

    info!(host = %config.host(), port = config.port(), db = %config.db_path(), "Starting API server");

    let state = api::create_app_state(&config).await?;
    let app = api::build_router(state);

    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PlanixError::Internal(format!("Server error: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown requested");
    }
}
