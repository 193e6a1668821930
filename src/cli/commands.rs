// src/cli/commands.rs
use std::path::Path;

use tracing::{error, info, instrument};

use crate::api::{build_router, AppState};
use crate::cli::error::{CliError, CliResult};
use crate::config::{generate_config, Settings};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;

/// Apply `serve` flags on top of the loaded settings
pub fn apply_serve_overrides(
    mut settings: Settings,
    bind: Option<&str>,
    db_url: Option<&str>,
) -> Settings {
    if let Some(bind) = bind {
        settings.bind_addr = bind.to_string();
    }
    if let Some(db_url) = db_url {
        settings.db_url = db_url.to_string();
    }
    settings
}

/// Run the HTTP server until Ctrl-C
#[instrument(skip_all)]
pub fn serve(settings: &Settings) -> CliResult<()> {
    // Single composition root; opens the store and runs migrations
    let services = ServiceContainer::new(settings)
        .map_err(|e| CliError::from(e).context("Failed to create service container"))?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    runtime.block_on(run_server(settings, services))
}

async fn run_server(settings: &Settings, services: ServiceContainer) -> CliResult<()> {
    let app = build_router(AppState::from(&services), &settings.api_prefix);

    let listener = tokio::net::TcpListener::bind(&settings.bind_addr)
        .await
        .map_err(|e| CliError::Io(e).context(format!("bind {}", settings.bind_addr)))?;
    let local_addr = listener.local_addr()?;

    eprintln!(
        "Serving bookmarks at http://{}{}/bookmarks ({} storage)",
        local_addr, settings.api_prefix, services.storage
    );
    info!("Listening on {}", local_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| CliError::CommandFailed(format!("HTTP server failed: {}", e)))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}

/// Create a new database file with the current schema
#[instrument]
pub fn create_db(path: &str) -> CliResult<()> {
    if Path::new(path).exists() {
        return Err(CliError::InvalidInput(format!(
            "Database already exists at: {}. Please choose a different path or delete the existing file.",
            path
        )));
    }

    println!("Creating new database at: {}", path);

    // Creates parent directories and runs all migrations
    SqliteBookmarkRepository::from_url(path, 1)?;

    println!("Database created successfully at: {}", path);
    Ok(())
}

pub fn show_config(settings: &Settings) -> CliResult<()> {
    println!("{}", generate_config(settings));
    Ok(())
}
