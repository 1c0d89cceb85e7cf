//! HTTP surface over the assignment engine.
//!
//! Handlers validate required fields, call into `services`, and map
//! `AppError` onto status codes. They hold no state besides the pool.

mod error;
mod pull_requests;
mod teams;
mod users;

pub use error::ApiErr;

use crate::config::ServiceConfig;
use crate::db::pool::DbPool;
use axum::routing::get;
use axum::Router;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;

/// Shared state for the axum routes.
#[derive(Clone)]
pub struct ApiState {
    pub db: DbPool,
}

/// Build the full router.
///
/// Requests running longer than `request_timeout` are answered with
/// 408; dropping the handler future rolls back its unit of work.
pub fn routes(state: ApiState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(teams::team_routes())
        .merge(users::user_routes())
        .merge(pull_requests::pull_request_routes())
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TimeoutLayer::new(request_timeout)))
}

/// GET /health
async fn health() -> &'static str {
    "OK"
}

/// Bind the configured address and serve until `cancel_token` fires.
///
/// In-flight requests are allowed to finish before this returns.
pub async fn serve(
    config: &ServiceConfig,
    db: DbPool,
    cancel_token: CancellationToken,
) -> std::io::Result<()> {
    let app = routes(ApiState { db }, config.request_timeout);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;

    log::info!("[api] Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
        })
        .await?;

    log::info!("[api] Server stopped");
    Ok(())
}
