//! Input data models for the compressor health engine.
//!
//! Everything here arrives from an external data-fetching layer, so all
//! readings are optional and coerced leniently: numbers or numeric strings are
//! accepted, anything else is treated as "not measured".

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---

/// Readings captured during one service visit.
///
/// A reading of `0` carries the same meaning as a missing one (not measured).
/// Field names are camelCase on the wire; snake_case and the short dashboard
/// names (`compressionTemp`, `deltaT`, `deltaP`) are accepted too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    // ---
    #[serde(
        default,
        alias = "compressionTemp",
        alias = "compression_temp_display",
        deserialize_with = "lenient_number"
    )]
    pub compression_temp_display: Option<f64>,

    #[serde(default, alias = "compression_temp_laser", deserialize_with = "lenient_number")]
    pub compression_temp_laser: Option<f64>,

    #[serde(default, alias = "separator_temp", deserialize_with = "lenient_number")]
    pub separator_temp: Option<f64>,

    /// Oil cooler inlet/outlet temperature difference.
    #[serde(
        default,
        alias = "deltaT",
        alias = "delta_t_oil_cooler",
        deserialize_with = "lenient_number"
    )]
    pub delta_t_oil_cooler: Option<f64>,

    /// Pressure drop across the separator element.
    #[serde(
        default,
        alias = "deltaP",
        alias = "delta_p_separator",
        deserialize_with = "lenient_number"
    )]
    pub delta_p_separator: Option<f64>,

    #[serde(default, alias = "motor_temp", deserialize_with = "lenient_number")]
    pub motor_temp: Option<f64>,

    #[serde(default, alias = "high_dust", deserialize_with = "lenient_flag")]
    pub high_dust: Option<bool>,

    #[serde(default, alias = "poor_ventilation", deserialize_with = "lenient_flag")]
    pub poor_ventilation: Option<bool>,

    /// `"Sí"` when the oil looks degraded, `"No"` when it looks good.
    #[serde(default, alias = "oil_degraded", deserialize_with = "lenient_flag")]
    pub oil_degraded: Option<bool>,
}

impl TelemetrySnapshot {
    // ---
    /// Compression temperature: display reading first, laser reading second.
    pub fn compression_temperature(&self) -> Option<f64> {
        // ---
        measured(self.compression_temp_display).or_else(|| measured(self.compression_temp_laser))
    }
}

/// Identifier assigned by the external maintenance catalog.
///
/// Catalogs use integer keys or strings (UUIDs, codes); both are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum CatalogId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogId::Number(n) => write!(f, "{n}"),
            CatalogId::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A service task from the maintenance catalog.
///
/// Only the interval drives classification; the ids are carried through so
/// results can be matched back to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTask {
    // ---
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient_id")]
    pub id: Option<CatalogId>,

    #[serde(
        default,
        alias = "compressor_id",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_id"
    )]
    pub compressor_id: Option<CatalogId>,

    /// Service interval in operating hours. Non-positive means the task has
    /// not been configured.
    #[serde(default, alias = "frequency_hours", deserialize_with = "lenient_number_or_zero")]
    pub frequency_hours: f64,
}

/// A task together with the operating hours accumulated since its last service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskHours {
    // ---
    #[serde(flatten)]
    pub task: MaintenanceTask,

    #[serde(default, alias = "hours_used", deserialize_with = "lenient_number")]
    pub hours_used: Option<f64>,
}

// ---

/// Filter out the "not measured" sentinel.
pub fn measured(reading: Option<f64>) -> Option<f64> {
    // ---
    reading.filter(|v| *v != 0.0)
}

/// Coerce a loosely typed JSON value into a finite number.
pub fn coerce_number(value: &Value) -> Option<f64> {
    // ---
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

/// Coerce a loosely typed JSON value into a yes/no flag.
pub fn coerce_flag(value: &Value) -> Option<bool> {
    // ---
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "sí" | "si" | "yes" | "true" => Some(true),
            "no" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Coerce a loosely typed JSON value into a catalog id.
pub fn coerce_id(value: &Value) -> Option<CatalogId> {
    // ---
    match value {
        Value::Number(n) => Some(
            n.as_i64()
                .map(CatalogId::Number)
                .unwrap_or_else(|| CatalogId::Text(n.to_string())),
        ),
        Value::String(s) if !s.trim().is_empty() => Some(CatalogId::Text(s.trim().to_string())),
        _ => None,
    }
}

pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<Option<CatalogId>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_id))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_number))
}

fn lenient_number_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_flag))
}
