// src/routes/health.rs
//! Liveness endpoint for the compressor health service.
//!
//! `/health` is polled by container orchestrators and CI to check that the
//! process is up and answering HTTP. Following EMBP, only the subrouter leaves
//! this file; the gateway (`mod.rs`) merges it into the top-level router.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Handle `GET /health`.
///
/// Static answer; never touches the engine.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges with the gateway router
/// whatever the state type is.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
