//! Maintenance status classifier.
//!
//! Turns accumulated operating hours against a task's service interval into
//! two independent readings:
//! - a per-task [`Tier`] for the single-item progress indicator, and
//! - an aggregate [`Urgency`] used when counting tasks per compressor.
//!
//! The two use different cutoffs and are kept separate on purpose; neither is
//! derived from the other.

use serde::Serialize;
use tracing::{debug, warn};
use crate::models::{CatalogId, MaintenanceTask, TaskHours};

// ---

/// Remaining hours at or below which a task is overdue.
pub const OVERDUE_REMAINING_HOURS: f64 = 10.0;

/// Remaining share of the interval (%) at or below which a task is upcoming.
pub const UPCOMING_REMAINING_PERCENT: f64 = 20.0;

/// Remaining share of the interval (%) at or below which a task is urgent.
pub const URGENT_REMAINING_PERCENT: f64 = 15.0;

/// Fraction of the interval used from which a task is due next.
pub const NEXT_USAGE_RATIO: f64 = 0.8;

/// Per-task urgency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    OnTrack,
    Upcoming,
    Overdue,
    /// The task has no positive service interval; nothing else is meaningful.
    ConfigIncomplete,
}

/// Aggregate urgency flags. At most one of them is set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Urgency {
    pub urgent: bool,
    pub next: bool,
}

/// Figures computed for a configured task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUsage {
    // ---
    /// Effective hours used, never negative.
    pub hours_used: f64,

    /// Hours until service is due; negative once overdue.
    pub remaining_hours: f64,

    /// Share of the interval consumed, clamped to `0..=100`.
    pub usage_percent: f64,

    pub remaining_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStatus {
    // ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_id: Option<CatalogId>,
    pub tier: Tier,

    #[serde(flatten)]
    pub usage: Option<ServiceUsage>,

    #[serde(flatten)]
    pub urgency: Urgency,
}

/// Classify one task given the hours accumulated since its last service.
///
/// Missing hours count as zero, the same as a genuine zero reading.
pub fn classify(task: &MaintenanceTask, hours_used: Option<f64>) -> MaintenanceStatus {
    // ---
    let frequency = task.frequency_hours;

    if !frequency.is_finite() || frequency <= 0.0 {
        debug!(task_id = ?task.id, frequency, "Maintenance task has no service interval");
        return MaintenanceStatus {
            task_id: task.id.clone(),
            tier: Tier::ConfigIncomplete,
            usage: None,
            urgency: Urgency::default(),
        };
    }

    let hours_used = hours_used.filter(|h| h.is_finite()).unwrap_or(0.0).max(0.0);
    let remaining_hours = frequency - hours_used;
    let usage_percent = (hours_used * 100.0 / frequency).clamp(0.0, 100.0);
    let remaining_percent = 100.0 - usage_percent;

    let usage = ServiceUsage {
        hours_used,
        remaining_hours,
        usage_percent,
        remaining_percent,
    };
    let tier = tier_for(&usage);
    let urgency = urgency_for(&usage, frequency);

    debug!(
        task_id = ?task.id,
        hours_used,
        remaining_hours,
        usage_percent,
        ?tier,
        "Maintenance task classified"
    );

    MaintenanceStatus {
        task_id: task.id.clone(),
        tier,
        usage: Some(usage),
        urgency,
    }
}

/// Single-item indicator: absolute hours first, then remaining share.
fn tier_for(usage: &ServiceUsage) -> Tier {
    // ---
    if usage.remaining_hours <= OVERDUE_REMAINING_HOURS {
        Tier::Overdue
    } else if usage.remaining_percent <= UPCOMING_REMAINING_PERCENT {
        Tier::Upcoming
    } else {
        Tier::OnTrack
    }
}

fn urgency_for(usage: &ServiceUsage, frequency: f64) -> Urgency {
    // ---
    let urgent =
        usage.remaining_hours <= 0.0 || usage.remaining_percent <= URGENT_REMAINING_PERCENT;
    let next = !urgent
        && usage.hours_used >= NEXT_USAGE_RATIO * frequency
        && usage.hours_used < frequency;

    Urgency { urgent, next }
}

/// Maintenance outlook for one compressor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressorSummary {
    // ---
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compressor_id: Option<CatalogId>,
    pub urgent: usize,
    pub next: usize,
    pub config_incomplete: usize,
    pub statuses: Vec<MaintenanceStatus>,
}

/// Classify every task of one compressor and count the aggregate flags.
///
/// Entries that name a different compressor are skipped. Entries without a
/// compressor id are taken to belong to the one being summarized.
pub fn summarize(compressor_id: Option<CatalogId>, entries: &[TaskHours]) -> CompressorSummary {
    // ---
    let statuses: Vec<MaintenanceStatus> = entries
        .iter()
        .filter(|entry| match (&compressor_id, &entry.task.compressor_id) {
            (Some(expected), Some(found)) if expected != found => {
                warn!(
                    task_id = ?entry.task.id,
                    %expected,
                    %found,
                    "Skipping task that belongs to another compressor"
                );
                false
            }
            _ => true,
        })
        .map(|entry| classify(&entry.task, entry.hours_used))
        .collect();

    let count = |pred: fn(&MaintenanceStatus) -> bool| {
        statuses.iter().filter(|s| pred(s)).count()
    };

    CompressorSummary {
        compressor_id,
        urgent: count(|s| s.urgency.urgent),
        next: count(|s| s.urgency.next),
        config_incomplete: count(|s| s.tier == Tier::ConfigIncomplete),
        statuses,
    }
}
