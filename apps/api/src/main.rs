//! Bucketgate API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dto;
mod error;
mod extract;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use axum::Router;
use bucketgate_application::AccessRequestRepository;
use bucketgate_core::AppError;
use bucketgate_infrastructure::{InMemoryAccessRequestRepository, PostgresAccessRequestRepository};
use tracing::info;

use crate::api_config::{ApiConfig, StorageBackend, init_tracing};
use crate::api_router::build_router;
use crate::api_services::{
    build_app_state, build_memory_session_layer, build_postgres_session_layer,
    connect_and_migrate,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let app = match &config.storage_backend {
        StorageBackend::Postgres { database_url } => {
            let pool = connect_and_migrate(database_url).await?;
            if config.migrate_only {
                info!("database migrations applied successfully");
                return Ok(());
            }

            let repository: Arc<dyn AccessRequestRepository> =
                Arc::new(PostgresAccessRequestRepository::new(pool.clone()));
            let app_state = build_app_state(&config, repository)?;
            let session_layer = build_postgres_session_layer(pool, config.cookie_secure).await?;
            build_router(app_state, &config.frontend_url, session_layer)?
        }
        StorageBackend::Memory => {
            if config.migrate_only {
                return Err(AppError::Validation(
                    "migrate requires STORAGE_BACKEND=postgres".to_owned(),
                ));
            }

            let repository: Arc<dyn AccessRequestRepository> =
                Arc::new(InMemoryAccessRequestRepository::new());
            let app_state = build_app_state(&config, repository)?;
            build_router(
                app_state,
                &config.frontend_url,
                build_memory_session_layer(config.cookie_secure),
            )?
        }
    };

    serve(&config, app).await
}

async fn serve(config: &ApiConfig, app: Router) -> Result<(), AppError> {
    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "bucketgate-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
