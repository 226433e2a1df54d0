use serde::{Deserialize, Serialize};

use super::enums::FieldType;

/// One measurable field of a lab report (a "component" in lab parlance,
/// e.g. Hemoglobin), or a narrative section of an imaging report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Unique within its test type.
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub unit: Option<String>,
    /// Human-written range text ("12.0-17.5", "< 200", "Negative").
    /// Parseable forms drive the warning band; opaque ones are kept for display.
    #[serde(default)]
    pub reference_range: Option<String>,
    /// Hard physiological floor — values below are rejected, never warned.
    #[serde(default)]
    pub min_value: Option<f64>,
    /// Hard physiological ceiling.
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub decimal_places: Option<u8>,
    #[serde(default)]
    pub required: bool,
    /// Grouping label for tabbed display.
    #[serde(default = "default_category")]
    pub category: String,
    /// Allowed values, select fields only. Order is display order.
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    /// Static advisory text shown under the input regardless of value.
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub placeholder: Option<String>,
}

fn default_category() -> String {
    "General".to_string()
}

impl FieldDefinition {
    pub fn is_numeric(&self) -> bool {
        self.field_type == FieldType::Number
    }

    /// Characters left before `max_length`, for live counters.
    /// None when the field carries no length cap.
    pub fn remaining_chars(&self, value: &str) -> Option<usize> {
        let max = self.max_length?;
        Some(max.saturating_sub(value.chars().count()))
    }
}
