//! Maintenance health evaluation engine for industrial compressors.
//!
//! Two pure components sit at the core:
//! - a rule-based diagnostic evaluator that grades one telemetry snapshot, and
//! - a maintenance-due classifier that turns accumulated hours into urgency.
//!
//! Both are exposed over a thin HTTP boundary (`routes`). This crate root is
//! the gateway (EMBP): sibling modules import what they need from here rather
//! than from each other.

pub mod config;
pub mod engine;
pub mod models;
pub mod routes;

pub use config::Config;

// Re-exported so routes/*.rs only need to know about the crate root
pub use engine::{
    classify, evaluate, summarize, CompressorSummary, DiagnosticReport, MaintenanceStatus,
    Severity, RULE_TABLE,
};
pub use models::{CatalogId, MaintenanceTask, TaskHours, TelemetrySnapshot};
