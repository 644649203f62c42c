//! Diagnostic endpoints: evaluate a telemetry snapshot, inspect the rule table.

use axum::{http::StatusCode, response::IntoResponse, routing::get, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::{evaluate, Config, DiagnosticReport, Severity, TelemetrySnapshot, RULE_TABLE};

// ---

pub fn router() -> Router<Config> {
    // ---
    Router::new()
        .route("/diagnostics/evaluate", post(evaluate_handler))
        .route("/diagnostics/rules", get(rules_handler))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RankedConsequence {
    text: String,
    severity: Severity,
}

/// Response body for `POST /diagnostics/evaluate`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EvaluationResponse {
    evaluation_id: Uuid,
    evaluated_at: DateTime<Utc>,
    report: DiagnosticReport,
    ranked_consequences: Vec<RankedConsequence>,
}

async fn evaluate_handler(Json(snapshot): Json<TelemetrySnapshot>) -> impl IntoResponse {
    // ---
    let evaluation_id = Uuid::new_v4();
    let report = evaluate(&snapshot);
    info!(
        "POST /diagnostics/evaluate - {} - {} cause(s), status {}",
        evaluation_id,
        report.causes.len(),
        report.overall_status
    );

    let ranked_consequences = report
        .ranked_consequences()
        .into_iter()
        .map(|(text, severity)| RankedConsequence {
            text: text.to_string(),
            severity,
        })
        .collect();

    let body = EvaluationResponse {
        evaluation_id,
        evaluated_at: Utc::now(),
        report,
        ranked_consequences,
    };
    (StatusCode::OK, Json(body))
}

async fn rules_handler() -> impl IntoResponse {
    // ---
    info!("GET /diagnostics/rules");
    (StatusCode::OK, Json(RULE_TABLE))
}
