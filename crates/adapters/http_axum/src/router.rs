//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use homegate_app::ports::{DeviceDiscovery, DeviceRepository};

use crate::state::AppState;

/// Build the top-level axum [`Router`].
///
/// Nests the API routes under `/api/v1` next to a `/health` probe.
/// Includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem, and a permissive
/// [`CorsLayer`] so browser clients on any origin can call the API.
pub fn build<R, D>(state: AppState<R, D>) -> Router
where
    R: DeviceRepository + Send + Sync + 'static,
    D: DeviceDiscovery + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", crate::api::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
