use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Values entered on a test-request intake form. All entries are strings as
/// typed (after masking); parsing happens in validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestForm {
    pub test_type: String,
    pub preferred_date: String, // YYYY-MM-DD
    pub preferred_time: String, // HH:MM
    pub priority: String,
    #[serde(default)]
    pub notes: String,
    /// Must be true when the test type requires fasting.
    #[serde(default)]
    pub fasting_acknowledged: bool,
    /// MRI/CT only. None means the question was never answered, which is an
    /// error — an explicit "no" is required.
    #[serde(default)]
    pub with_contrast: Option<bool>,
    #[serde(default)]
    pub body_part: String,
    #[serde(default)]
    pub clinical_indication: String,
    /// Extra intake fields referenced by a test type's `required_fields`.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl RequestForm {
    pub fn new(test_type: impl Into<String>) -> Self {
        Self {
            test_type: test_type.into(),
            ..Self::default()
        }
    }

    /// Look up a value by the name used in `required_fields`. Well-known
    /// names resolve to the struct fields; everything else hits `fields`.
    pub fn value_of(&self, name: &str) -> &str {
        match name {
            "preferred_date" => &self.preferred_date,
            "preferred_time" => &self.preferred_time,
            "priority" => &self.priority,
            "notes" => &self.notes,
            "body_part" => &self.body_part,
            "clinical_indication" => &self.clinical_indication,
            other => self.fields.get(other).map(String::as_str).unwrap_or(""),
        }
    }
}

/// Values entered on a lab-report entry form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportForm {
    pub test_type: String,
    /// Component name → entered value. Empty string = not filled in.
    #[serde(default)]
    pub results: BTreeMap<String, String>,
    #[serde(default)]
    pub technician_notes: String,
    #[serde(default)]
    pub completed_at: String, // YYYY-MM-DD HH:MM
}

impl ReportForm {
    pub fn new(test_type: impl Into<String>) -> Self {
        Self {
            test_type: test_type.into(),
            ..Self::default()
        }
    }

    pub fn result(&self, component: &str) -> &str {
        self.results.get(component).map(String::as_str).unwrap_or("")
    }

    /// Whether any component carries a non-blank value.
    pub fn has_any_result(&self) -> bool {
        self.results.values().any(|v| !v.trim().is_empty())
    }
}
