//! Diagnostic rule evaluator.
//!
//! Runs every metric rule independently against one snapshot and hands the
//! resulting findings to the aggregator. Pure: no I/O, no shared state, and
//! no input can make it fail.

use tracing::debug;

use super::bands::{MetricRule, RULE_TABLE};
use super::report::{aggregate, DiagnosticReport, Finding};
use crate::models::TelemetrySnapshot;

// ---

/// Evaluate a snapshot against the production rule table.
pub fn evaluate(snapshot: &TelemetrySnapshot) -> DiagnosticReport {
    evaluate_with(RULE_TABLE, snapshot)
}

/// Evaluate a snapshot against an arbitrary rule table.
pub fn evaluate_with(
    rules: &'static [MetricRule],
    snapshot: &TelemetrySnapshot,
) -> DiagnosticReport {
    // ---
    let report = aggregate(findings(rules, snapshot));

    debug!(
        positives = report.positives.len(),
        causes = report.causes.len(),
        status = %report.overall_status,
        "Snapshot evaluated"
    );
    report
}

/// Raw per-metric findings, in rule order.
pub fn findings(rules: &'static [MetricRule], snapshot: &TelemetrySnapshot) -> Vec<Finding> {
    // ---
    rules
        .iter()
        .filter_map(|rule| {
            rule.classify(rule.metric.reading(snapshot))
                .map(|outcome| Finding::new(rule.metric, outcome))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::engine::bands::{Band, Bound, Classifier, Metric, Outcome};
    use crate::engine::report::{FindingKind, OverallStatus, Severity};

    fn healthy_snapshot() -> TelemetrySnapshot {
        // ---
        TelemetrySnapshot {
            compression_temp_display: Some(88.0),
            compression_temp_laser: None,
            separator_temp: Some(85.0),
            delta_t_oil_cooler: Some(16.0),
            delta_p_separator: Some(0.1),
            motor_temp: Some(80.0),
            high_dust: Some(false),
            poor_ventilation: Some(false),
            oil_degraded: Some(false),
        }
    }

    #[test]
    fn test_healthy_snapshot_is_good() {
        // ---
        let report = evaluate(&healthy_snapshot());

        assert_eq!(
            report.positives,
            vec![
                "within optimal range",
                "adequate",
                "good thermal efficiency",
                "optimal condition",
                "normal",
                "adequate environment",
                "oil visually good",
            ]
        );
        assert!(report.causes.is_empty());
        assert!(report.consequences.is_empty());
        assert!(report.actions.is_empty());
        assert_eq!(report.overall_status, OverallStatus::Good);
    }

    #[test]
    fn test_findings_name_their_metric() {
        // ---
        let report = evaluate(&healthy_snapshot());
        let tagged: Vec<(Metric, &str)> = report
            .findings
            .iter()
            .map(|finding| (finding.metric, finding.text))
            .collect();

        assert_eq!(
            tagged,
            vec![
                (Metric::CompressionTemperature, "within optimal range"),
                (Metric::SeparatorTemperature, "adequate"),
                (Metric::OilCoolerDeltaT, "good thermal efficiency"),
                (Metric::SeparatorDeltaP, "optimal condition"),
                (Metric::MotorTemperature, "normal"),
                (Metric::Environment, "adequate environment"),
                (Metric::OilCondition, "oil visually good"),
            ]
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["findings"][1]["metric"], "separator_temperature");
        assert_eq!(json["findings"][1]["kind"], "positive");
        assert_eq!(json["findings"][1]["text"], "adequate");
    }

    #[test]
    fn test_hot_compression_is_critical() {
        // ---
        let snapshot = TelemetrySnapshot {
            compression_temp_display: Some(110.0),
            ..healthy_snapshot()
        };
        let report = evaluate(&snapshot);

        assert_eq!(report.causes, vec!["temperature out of range"]);
        assert_eq!(
            report.consequences.get("risk of high-temperature shutdown"),
            Some(&Severity::High)
        );
        assert_eq!(
            report.consequences.get("accelerated oil degradation"),
            Some(&Severity::Moderate)
        );
        assert_eq!(report.actions, vec!["inspect coolers, ventilation and oil"]);
        assert_eq!(report.positives.len(), 6);
        assert_eq!(report.overall_status, OverallStatus::Critical);
    }

    #[test]
    fn test_low_severity_only_is_acceptable() {
        // ---
        let snapshot = TelemetrySnapshot {
            poor_ventilation: Some(true),
            ..healthy_snapshot()
        };
        let report = evaluate(&snapshot);

        assert_eq!(report.causes, vec!["unfavorable environment"]);
        assert_eq!(report.actions, vec!["improve cleaning and ventilation"]);
        assert_eq!(report.overall_status, OverallStatus::Acceptable);
    }

    #[test]
    fn test_moderate_severity_needs_attention() {
        // ---
        let snapshot = TelemetrySnapshot {
            delta_t_oil_cooler: Some(4.0),
            ..healthy_snapshot()
        };
        let report = evaluate(&snapshot);
        assert_eq!(report.causes, vec!["low cooler efficiency"]);
        assert_eq!(report.overall_status, OverallStatus::NeedsAttention);
    }

    #[test]
    fn test_everything_wrong() {
        // ---
        let snapshot = TelemetrySnapshot {
            compression_temp_display: Some(60.0),
            compression_temp_laser: None,
            separator_temp: Some(99.0),
            delta_t_oil_cooler: Some(5.0),
            delta_p_separator: Some(1.2),
            motor_temp: Some(95.0),
            high_dust: Some(true),
            poor_ventilation: None,
            oil_degraded: Some(true),
        };
        let report = evaluate(&snapshot);

        assert!(report.positives.is_empty());
        assert_eq!(
            report.causes,
            vec![
                "temperature out of range",
                "separator overheated",
                "low cooler efficiency",
                "separator saturated",
                "motor overheating",
                "unfavorable environment",
                "degraded oil",
            ]
        );
        assert_eq!(report.actions.len(), 7);
        assert_eq!(report.consequences.len(), 10);
        assert_eq!(report.ranked_consequences()[0].1, Severity::High);
        assert_eq!(report.overall_status, OverallStatus::Critical);
    }

    #[test]
    fn test_empty_snapshot_only_reports_environment() {
        // ---
        let report = evaluate(&TelemetrySnapshot::default());
        assert_eq!(report.positives, vec!["adequate environment"]);
        assert!(report.causes.is_empty());
        assert_eq!(report.overall_status, OverallStatus::Good);
    }

    #[test]
    fn test_zero_readings_are_skipped() {
        // ---
        let snapshot = TelemetrySnapshot {
            compression_temp_display: Some(0.0),
            separator_temp: Some(0.0),
            delta_t_oil_cooler: Some(0.0),
            delta_p_separator: Some(0.0),
            motor_temp: Some(0.0),
            ..Default::default()
        };
        let found = findings(RULE_TABLE, &snapshot);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].metric, Metric::Environment);
        assert_eq!(found[0].kind, FindingKind::Positive);
    }

    #[test]
    fn test_laser_reading_used_when_display_missing() {
        // ---
        let snapshot = TelemetrySnapshot {
            compression_temp_display: None,
            compression_temp_laser: Some(100.0),
            ..healthy_snapshot()
        };
        let report = evaluate(&snapshot);
        assert_eq!(
            report.positives[0],
            "acceptable for continuous operation"
        );
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        // ---
        for temp in [0.0, 50.0, 80.0, 95.0, 100.0, 105.0, 120.0] {
            let snapshot = TelemetrySnapshot {
                compression_temp_display: Some(temp),
                motor_temp: Some(temp),
                ..healthy_snapshot()
            };
            let first = evaluate(&snapshot);
            let second = evaluate(&snapshot);
            assert_eq!(first, second);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn test_custom_rule_table() {
        // ---
        static CUSTOM: &[MetricRule] = &[MetricRule {
            metric: Metric::MotorTemperature,
            classifier: Classifier::Bands {
                bands: &[Band {
                    lower: Bound::Unbounded,
                    upper: Bound::Unbounded,
                    outcome: Outcome::Positive { text: "any motor reading" },
                }],
            },
        }];

        let report = evaluate_with(CUSTOM, &healthy_snapshot());
        assert_eq!(report.positives, vec!["any motor reading"]);

        // Unmeasured still contributes nothing, even to a catch-all band
        let report = evaluate_with(CUSTOM, &TelemetrySnapshot::default());
        assert!(report.positives.is_empty());
    }
}
