//! Maintenance endpoints: classify one task, summarize a compressor.

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{classify, summarize, CatalogId, Config, TaskHours};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new()
        .route("/maintenance/classify", post(classify_handler))
        .route("/maintenance/summary", post(summary_handler))
}

/// Request body for `POST /maintenance/summary`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRequest {
    #[serde(
        default,
        alias = "compressor_id",
        deserialize_with = "crate::models::lenient_id"
    )]
    compressor_id: Option<CatalogId>,
    #[serde(default)]
    tasks: Vec<TaskHours>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

async fn classify_handler(Json(entry): Json<TaskHours>) -> impl IntoResponse {
    // ---
    let status = classify(&entry.task, entry.hours_used);
    info!(
        "POST /maintenance/classify - task {:?} is {:?}",
        status.task_id, status.tier
    );
    (StatusCode::OK, Json(status))
}

async fn summary_handler(
    State(config): State<Config>,
    Json(request): Json<SummaryRequest>,
) -> impl IntoResponse {
    // ---
    if request.tasks.len() > config.max_summary_tasks {
        warn!(
            "POST /maintenance/summary - rejected {} tasks (limit {})",
            request.tasks.len(),
            config.max_summary_tasks
        );
        let body = ErrorResponse {
            error: format!(
                "too many tasks: {} (limit {})",
                request.tasks.len(),
                config.max_summary_tasks
            ),
        };
        return (StatusCode::PAYLOAD_TOO_LARGE, Json(body)).into_response();
    }

    let summary = summarize(request.compressor_id, &request.tasks);
    info!(
        "POST /maintenance/summary - compressor {:?}: {} urgent, {} next, {} incomplete",
        summary.compressor_id, summary.urgent, summary.next, summary.config_incomplete
    );
    (StatusCode::OK, Json(summary)).into_response()
}
