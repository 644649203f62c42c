//! Finding aggregation and the diagnostic report handed to presentation.
//!
//! Per-metric findings are folded into a fresh [`DiagnosticReport`]:
//! positives and causes keep rule order, consequences collapse by text
//! keeping the highest severity, and the overall status follows from the
//! worst consequence.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::bands::{Metric, Outcome};

// ---

/// Impact of a consequence, 3 being the worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Severity {
    Low = 1,
    Moderate = 2,
    High = 3,
}

impl From<Severity> for u8 {
    fn from(severity: Severity) -> Self {
        severity as u8
    }
}

/// Overall grade of a diagnosis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OverallStatus {
    #[default]
    Good,
    Acceptable,
    NeedsAttention,
    Critical,
}

impl OverallStatus {
    // ---
    /// Map the worst consequence severity onto the four-level scale.
    pub fn from_max_severity(max: Option<Severity>) -> Self {
        // ---
        match max {
            None => OverallStatus::Good,
            Some(Severity::Low) => OverallStatus::Acceptable,
            Some(Severity::Moderate) => OverallStatus::NeedsAttention,
            Some(Severity::High) => OverallStatus::Critical,
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallStatus::Good => write!(f, "GOOD"),
            OverallStatus::Acceptable => write!(f, "ACCEPTABLE"),
            OverallStatus::NeedsAttention => write!(f, "NEEDS_ATTENTION"),
            OverallStatus::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Positive,
    Cause,
}

/// Raw output of one metric rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Finding {
    // ---
    pub metric: Metric,
    pub kind: FindingKind,
    pub text: &'static str,
    #[serde(skip)]
    pub outcome: &'static Outcome,
}

impl Finding {
    // ---
    pub fn new(metric: Metric, outcome: &'static Outcome) -> Self {
        // ---
        let (kind, text) = match outcome {
            Outcome::Positive { text } => (FindingKind::Positive, *text),
            Outcome::Cause(cause) => (FindingKind::Cause, cause.text),
        };
        Finding {
            metric,
            kind,
            text,
            outcome,
        }
    }
}

/// Graded diagnosis of a single telemetry snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    // ---
    pub positives: Vec<String>,
    pub causes: Vec<String>,
    pub consequences: BTreeMap<String, Severity>,
    pub actions: Vec<String>,
    pub overall_status: OverallStatus,

    /// Every positive and cause in rule order, tagged with its metric.
    pub findings: Vec<Finding>,
}

impl DiagnosticReport {
    // ---
    /// Worst severity among the consequences, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.consequences.values().copied().max()
    }

    /// Consequences ordered worst first, ties broken by text.
    pub fn ranked_consequences(&self) -> Vec<(&str, Severity)> {
        // ---
        let mut ranked: Vec<(&str, Severity)> = self
            .consequences
            .iter()
            .map(|(text, severity)| (text.as_str(), *severity))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Fold per-metric findings into a report.
///
/// Deterministic: the same findings in the same order always produce an
/// identical report.
pub fn aggregate<I>(findings: I) -> DiagnosticReport
where
    I: IntoIterator<Item = Finding>,
{
    // ---
    let mut report = DiagnosticReport::default();

    for finding in findings {
        report.findings.push(finding);

        match finding.outcome {
            Outcome::Positive { text } => report.positives.push(text.to_string()),
            Outcome::Cause(cause) => {
                report.causes.push(cause.text.to_string());

                for consequence in cause.consequences {
                    report
                        .consequences
                        .entry(consequence.text.to_string())
                        .and_modify(|existing| *existing = (*existing).max(consequence.severity))
                        .or_insert(consequence.severity);
                }

                if !report.actions.iter().any(|a| a == cause.action) {
                    report.actions.push(cause.action.to_string());
                }
            }
        }
    }

    report.overall_status = OverallStatus::from_max_severity(report.max_severity());
    report
}
