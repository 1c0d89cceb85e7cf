//! Reviewer service - assigns and reassigns pull request reviewers.
//!
//! The engine lives in `services` and runs every operation as one unit of
//! work against the SQLite store in `db`. `api` exposes it over HTTP.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;

use config::{ConfigError, ServiceConfig};
use db::DbError;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Errors that stop the service from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Open the store and serve HTTP until `shutdown` is cancelled.
pub async fn run(config: ServiceConfig, shutdown: CancellationToken) -> Result<(), StartupError> {
    let pool = db::initialize(&config.db_path, config.pool_settings()).await?;

    api::serve(&config, pool.clone(), shutdown).await?;

    pool.close().await;
    log::info!("[db] Connection pool closed");

    Ok(())
}
