//! Declarative threshold table for the diagnostic rules.
//!
//! Each metric owns an ordered list of bands evaluated first-match-wins, from
//! best to worst. Flag-valued metrics (environment, oil condition) use a
//! two-way rule instead. The table is plain static data so it can be served
//! as-is to anyone who wants to show why a diagnosis came out the way it did.

use serde::Serialize;

use super::report::Severity;
use crate::models::{measured, TelemetrySnapshot};

// ---

/// One end of a band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Bound {
    Unbounded,
    Inclusive(f64),
    Exclusive(f64),
}

impl Bound {
    // ---
    fn admits_above(&self, value: f64) -> bool {
        match *self {
            Bound::Unbounded => true,
            Bound::Inclusive(lower) => value >= lower,
            Bound::Exclusive(lower) => value > lower,
        }
    }

    fn admits_below(&self, value: f64) -> bool {
        match *self {
            Bound::Unbounded => true,
            Bound::Inclusive(upper) => value <= upper,
            Bound::Exclusive(upper) => value < upper,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Consequence {
    pub text: &'static str,
    pub severity: Severity,
}

/// A detected problem with its consequences and the recommended fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cause {
    pub text: &'static str,
    pub consequences: &'static [Consequence],
    pub action: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    Positive { text: &'static str },
    Cause(Cause),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Band {
    pub lower: Bound,
    pub upper: Bound,
    pub outcome: Outcome,
}

impl Band {
    // ---
    /// NaN never falls inside a band.
    pub fn contains(&self, value: f64) -> bool {
        self.lower.admits_above(value) && self.upper.admits_below(value)
    }
}

/// How a metric's reading is turned into an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Classifier {
    Bands { bands: &'static [Band] },
    Flag { clear: Outcome, raised: Outcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    CompressionTemperature,
    SeparatorTemperature,
    OilCoolerDeltaT,
    SeparatorDeltaP,
    MotorTemperature,
    Environment,
    OilCondition,
}

/// A metric's value as seen by its rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    Value(f64),
    Flag(bool),
    Unmeasured,
}

impl Metric {
    // ---
    /// Extract this metric's reading from a snapshot.
    pub fn reading(&self, snapshot: &TelemetrySnapshot) -> Reading {
        // ---
        let value = match self {
            Metric::CompressionTemperature => snapshot.compression_temperature(),
            Metric::SeparatorTemperature => measured(snapshot.separator_temp),
            Metric::OilCoolerDeltaT => measured(snapshot.delta_t_oil_cooler),
            Metric::SeparatorDeltaP => measured(snapshot.delta_p_separator),
            Metric::MotorTemperature => measured(snapshot.motor_temp),
            Metric::Environment => {
                let unfavorable = snapshot.high_dust.unwrap_or(false)
                    || snapshot.poor_ventilation.unwrap_or(false);
                return Reading::Flag(unfavorable);
            }
            Metric::OilCondition => {
                return snapshot
                    .oil_degraded
                    .map_or(Reading::Unmeasured, Reading::Flag);
            }
        };
        value.map_or(Reading::Unmeasured, Reading::Value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRule {
    pub metric: Metric,
    pub classifier: Classifier,
}

impl MetricRule {
    // ---
    /// Classify a reading, `None` when the rule has nothing to say about it.
    pub fn classify(&self, reading: Reading) -> Option<&Outcome> {
        // ---
        match (&self.classifier, reading) {
            (Classifier::Bands { bands }, Reading::Value(value)) => bands
                .iter()
                .find(|band| band.contains(value))
                .map(|band| &band.outcome),
            (Classifier::Flag { clear, raised }, Reading::Flag(flag)) => {
                Some(if flag { raised } else { clear })
            }
            _ => None,
        }
    }
}

// ---

const COMPRESSION_OUT_OF_RANGE: Outcome = Outcome::Cause(Cause {
    text: "temperature out of range",
    consequences: &[
        Consequence {
            text: "risk of high-temperature shutdown",
            severity: Severity::High,
        },
        Consequence {
            text: "accelerated oil degradation",
            severity: Severity::Moderate,
        },
    ],
    action: "inspect coolers, ventilation and oil",
});

/// Production rule set, in evaluation order.
pub static RULE_TABLE: &[MetricRule] = &[
    MetricRule {
        metric: Metric::CompressionTemperature,
        classifier: Classifier::Bands {
            bands: &[
                Band {
                    lower: Bound::Inclusive(80.0),
                    upper: Bound::Inclusive(95.0),
                    outcome: Outcome::Positive {
                        text: "within optimal range",
                    },
                },
                Band {
                    lower: Bound::Exclusive(95.0),
                    upper: Bound::Inclusive(105.0),
                    outcome: Outcome::Positive {
                        text: "acceptable for continuous operation",
                    },
                },
                Band {
                    lower: Bound::Exclusive(0.0),
                    upper: Bound::Exclusive(80.0),
                    outcome: COMPRESSION_OUT_OF_RANGE,
                },
                Band {
                    lower: Bound::Exclusive(105.0),
                    upper: Bound::Unbounded,
                    outcome: COMPRESSION_OUT_OF_RANGE,
                },
            ],
        },
    },
    MetricRule {
        metric: Metric::SeparatorTemperature,
        classifier: Classifier::Bands {
            bands: &[
                Band {
                    lower: Bound::Exclusive(0.0),
                    upper: Bound::Inclusive(90.0),
                    outcome: Outcome::Positive {
                        text: "adequate",
                    },
                },
                Band {
                    lower: Bound::Exclusive(90.0),
                    upper: Bound::Inclusive(95.0),
                    outcome: Outcome::Positive {
                        text: "near limit but acceptable",
                    },
                },
                Band {
                    lower: Bound::Exclusive(95.0),
                    upper: Bound::Unbounded,
                    outcome: Outcome::Cause(Cause {
                        text: "separator overheated",
                        consequences: &[Consequence {
                            text: "oil carryover into network",
                            severity: Severity::High,
                        }],
                        action: "inspect separator and oil return",
                    }),
                },
            ],
        },
    },
    MetricRule {
        metric: Metric::OilCoolerDeltaT,
        classifier: Classifier::Bands {
            bands: &[
                Band {
                    lower: Bound::Inclusive(15.0),
                    upper: Bound::Unbounded,
                    outcome: Outcome::Positive {
                        text: "good thermal efficiency",
                    },
                },
                Band {
                    lower: Bound::Inclusive(10.0),
                    upper: Bound::Exclusive(15.0),
                    outcome: Outcome::Positive {
                        text: "acceptable thermal efficiency",
                    },
                },
                Band {
                    lower: Bound::Exclusive(0.0),
                    upper: Bound::Exclusive(10.0),
                    outcome: Outcome::Cause(Cause {
                        text: "low cooler efficiency",
                        consequences: &[Consequence {
                            text: "high internal temperature",
                            severity: Severity::Moderate,
                        }],
                        action: "clean cooler, check fan",
                    }),
                },
            ],
        },
    },
    MetricRule {
        metric: Metric::SeparatorDeltaP,
        classifier: Classifier::Bands {
            bands: &[
                Band {
                    lower: Bound::Exclusive(0.0),
                    upper: Bound::Inclusive(0.2),
                    outcome: Outcome::Positive {
                        text: "optimal condition",
                    },
                },
                Band {
                    lower: Bound::Exclusive(0.2),
                    upper: Bound::Inclusive(0.7),
                    outcome: Outcome::Positive {
                        text: "acceptable condition",
                    },
                },
                Band {
                    lower: Bound::Exclusive(0.7),
                    upper: Bound::Unbounded,
                    outcome: Outcome::Cause(Cause {
                        text: "separator saturated",
                        consequences: &[
                            Consequence {
                                text: "increased power draw",
                                severity: Severity::Low,
                            },
                            Consequence {
                                text: "thermal overload",
                                severity: Severity::Moderate,
                            },
                        ],
                        action: "replace separator",
                    }),
                },
            ],
        },
    },
    MetricRule {
        metric: Metric::MotorTemperature,
        classifier: Classifier::Bands {
            bands: &[
                Band {
                    lower: Bound::Exclusive(0.0),
                    upper: Bound::Inclusive(85.0),
                    outcome: Outcome::Positive {
                        text: "normal",
                    },
                },
                Band {
                    lower: Bound::Exclusive(85.0),
                    upper: Bound::Inclusive(90.0),
                    outcome: Outcome::Positive {
                        text: "elevated but acceptable",
                    },
                },
                Band {
                    lower: Bound::Exclusive(90.0),
                    upper: Bound::Unbounded,
                    outcome: Outcome::Cause(Cause {
                        text: "motor overheating",
                        consequences: &[
                            Consequence {
                                text: "thermal-protection trip",
                                severity: Severity::High,
                            },
                            Consequence {
                                text: "reduced motor lifespan",
                                severity: Severity::Moderate,
                            },
                        ],
                        action: "check amperage, voltage and pressure",
                    }),
                },
            ],
        },
    },
    MetricRule {
        metric: Metric::Environment,
        classifier: Classifier::Flag {
            clear: Outcome::Positive {
                text: "adequate environment",
            },
            raised: Outcome::Cause(Cause {
                text: "unfavorable environment",
                consequences: &[Consequence {
                    text: "accelerated cooler fouling",
                    severity: Severity::Low,
                }],
                action: "improve cleaning and ventilation",
            }),
        },
    },
    MetricRule {
        metric: Metric::OilCondition,
        classifier: Classifier::Flag {
            clear: Outcome::Positive {
                text: "oil visually good",
            },
            raised: Outcome::Cause(Cause {
                text: "degraded oil",
                consequences: &[Consequence {
                    text: "poor screw lubrication",
                    severity: Severity::High,
                }],
                action: "oil change and thermal check",
            }),
        },
    },
];
