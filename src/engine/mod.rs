//! Maintenance health evaluation engine.
//!
//! Gateway for the engine submodules (EMBP): callers go through the
//! re-exports below rather than reaching into `bands`, `evaluator`,
//! `report` or `maintenance` directly.

mod bands;
mod evaluator;
mod maintenance;
mod report;

pub use bands::{
    Band, Bound, Cause, Classifier, Consequence, Metric, MetricRule, Outcome, Reading, RULE_TABLE,
};
pub use evaluator::{evaluate, evaluate_with, findings};
pub use maintenance::{
    classify, summarize, CompressorSummary, MaintenanceStatus, ServiceUsage, Tier, Urgency,
    NEXT_USAGE_RATIO, OVERDUE_REMAINING_HOURS, UPCOMING_REMAINING_PERCENT, URGENT_REMAINING_PERCENT,
};
pub use report::{aggregate, DiagnosticReport, Finding, FindingKind, OverallStatus, Severity};
