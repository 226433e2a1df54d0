//! Per-field value validation. Pure: a function of (value, field definition),
//! no side effects. Hard physiological bounds produce errors; the reference
//! range only ever produces an advisory warning.

use serde::{Deserialize, Serialize};

use crate::models::{FieldDefinition, FieldType, ValidationStatus};
use crate::range;

/// Outcome of validating one field value. Warnings keep `is_valid` true —
/// a clinically abnormal result is still a submittable result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub status: ValidationStatus,
    pub message: String,
    /// Presentation hint derived from `status`.
    pub color_class: String,
}

impl ValidationResult {
    pub fn normal() -> Self {
        Self::with_status(ValidationStatus::Normal, String::new())
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_status(ValidationStatus::Warning, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            status: ValidationStatus::Error,
            message: message.into(),
            color_class: ValidationStatus::Error.color_class().to_string(),
        }
    }

    fn with_status(status: ValidationStatus, message: String) -> Self {
        Self {
            is_valid: true,
            status,
            message,
            color_class: status.color_class().to_string(),
        }
    }
}

/// Validate a candidate value against its field definition.
pub fn validate_value(value: &str, field: &FieldDefinition) -> ValidationResult {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        if field.required {
            return ValidationResult::error("This field is required");
        }
        return ValidationResult::normal();
    }

    match field.field_type {
        FieldType::Number => validate_numeric(trimmed, field),
        FieldType::Text | FieldType::Textarea => validate_length(trimmed, field),
        FieldType::Select => validate_membership(trimmed, field),
    }
}

fn validate_numeric(trimmed: &str, field: &FieldDefinition) -> ValidationResult {
    let value: f64 = match trimmed.parse() {
        Ok(v) => v,
        Err(_) => return ValidationResult::error("Please enter a valid number"),
    };
    // f64::from_str accepts "NaN" and "inf", which would sail past every
    // bound comparison below.
    if !value.is_finite() {
        return ValidationResult::error("Please enter a valid number");
    }

    // Hard physiological floor/ceiling, never bypassed.
    if let Some(min) = field.min_value {
        if value < min {
            return ValidationResult::error(bound_message("at least", min, field));
        }
    }
    if let Some(max) = field.max_value {
        if value > max {
            return ValidationResult::error(bound_message("at most", max, field));
        }
    }

    match range::parse_opt(field.reference_range.as_deref()) {
        Some(range) if value < range.min => ValidationResult::warning(format!(
            "Below reference range ({})",
            field.reference_range.as_deref().unwrap_or_default()
        )),
        Some(range) if value > range.max => ValidationResult::warning(format!(
            "Above reference range ({})",
            field.reference_range.as_deref().unwrap_or_default()
        )),
        // Inside the range, or no parseable range declared.
        _ => ValidationResult::normal(),
    }
}

fn bound_message(direction: &str, bound: f64, field: &FieldDefinition) -> String {
    match &field.unit {
        Some(unit) => format!("Value must be {direction} {bound} {unit}"),
        None => format!("Value must be {direction} {bound}"),
    }
}

fn validate_length(trimmed: &str, field: &FieldDefinition) -> ValidationResult {
    let len = trimmed.chars().count();
    if let Some(min) = field.min_length {
        if len < min {
            return ValidationResult::error(format!("Must be at least {min} characters"));
        }
    }
    if let Some(max) = field.max_length {
        if len > max {
            return ValidationResult::error(format!("Must not exceed {max} characters"));
        }
    }
    ValidationResult::normal()
}

fn validate_membership(trimmed: &str, field: &FieldDefinition) -> ValidationResult {
    if field.options.iter().any(|o| o == trimmed) {
        return ValidationResult::normal();
    }
    ValidationResult::error(format!("Must be one of: {}", field.options.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_field() -> FieldDefinition {
        FieldDefinition {
            name: "Hemoglobin".into(),
            field_type: FieldType::Number,
            unit: Some("g/dL".into()),
            reference_range: Some("12.0-17.5".into()),
            min_value: Some(3.0),
            max_value: Some(25.0),
            decimal_places: Some(1),
            required: true,
            category: "Hematology".into(),
            options: vec![],
            min_length: None,
            max_length: None,
            warning: None,
            placeholder: None,
        }
    }

    fn select_field() -> FieldDefinition {
        FieldDefinition {
            name: "Glucose".into(),
            field_type: FieldType::Select,
            unit: None,
            reference_range: Some("Negative".into()),
            min_value: None,
            max_value: None,
            decimal_places: None,
            required: false,
            category: "Chemical".into(),
            options: vec![
                "Negative".into(),
                "Trace".into(),
                "+1".into(),
                "+2".into(),
                "+3".into(),
                "+4".into(),
            ],
            min_length: None,
            max_length: None,
            warning: None,
            placeholder: None,
        }
    }

    fn text_field(min: Option<usize>, max: Option<usize>) -> FieldDefinition {
        FieldDefinition {
            name: "Findings".into(),
            field_type: FieldType::Textarea,
            unit: None,
            reference_range: None,
            min_value: None,
            max_value: None,
            decimal_places: None,
            required: false,
            category: "Report".into(),
            options: vec![],
            min_length: min,
            max_length: max,
            warning: None,
            placeholder: None,
        }
    }

    // ── Blank values ────────────────────────────────────────────────

    #[test]
    fn blank_required_field_errors() {
        let result = validate_value("", &numeric_field());
        assert!(!result.is_valid);
        assert_eq!(result.status, ValidationStatus::Error);
        assert_eq!(result.message, "This field is required");
    }

    #[test]
    fn blank_optional_field_is_normal() {
        let mut field = numeric_field();
        field.required = false;
        let result = validate_value("   ", &field);
        assert!(result.is_valid);
        assert_eq!(result.status, ValidationStatus::Normal);
        assert!(result.message.is_empty());
    }

    // ── Numeric classification ──────────────────────────────────────

    #[test]
    fn non_numeric_input_errors() {
        let result = validate_value("abc", &numeric_field());
        assert!(!result.is_valid);
        assert!(result.message.contains("valid number"));
    }

    #[test]
    fn non_finite_input_errors() {
        // These parse as f64 but compare false against every bound, so they
        // must be rejected up front rather than classified Normal.
        for value in ["NaN", "nan", "inf", "-inf", "infinity"] {
            let result = validate_value(value, &numeric_field());
            assert!(!result.is_valid, "{value} should be rejected");
            assert!(result.message.contains("valid number"));
        }
    }

    #[test]
    fn inside_reference_range_is_normal() {
        let result = validate_value("14.2", &numeric_field());
        assert!(result.is_valid);
        assert_eq!(result.status, ValidationStatus::Normal);
        assert_eq!(result.color_class, "range-normal");
    }

    #[test]
    fn outside_range_within_bounds_warns_but_stays_valid() {
        let result = validate_value("10.2", &numeric_field());
        assert!(result.is_valid);
        assert_eq!(result.status, ValidationStatus::Warning);
        assert!(result.message.contains("Below reference range"));
        assert_eq!(result.color_class, "range-warning");
    }

    #[test]
    fn above_range_within_bounds_warns() {
        let result = validate_value("19.0", &numeric_field());
        assert!(result.is_valid);
        assert_eq!(result.status, ValidationStatus::Warning);
        assert!(result.message.contains("Above reference range"));
    }

    #[test]
    fn below_physiological_floor_errors() {
        let result = validate_value("1.0", &numeric_field());
        assert!(!result.is_valid);
        assert_eq!(result.status, ValidationStatus::Error);
        assert!(result.message.contains("at least 3"));
    }

    #[test]
    fn above_physiological_ceiling_errors() {
        let result = validate_value("30.0", &numeric_field());
        assert!(!result.is_valid);
        assert!(result.message.contains("at most 25"));
    }

    #[test]
    fn floor_beats_reference_range() {
        // 1.0 is both below min_value and below the reference range;
        // the hard bound wins and the result is an error, not a warning.
        let result = validate_value("1.0", &numeric_field());
        assert_eq!(result.status, ValidationStatus::Error);
    }

    #[test]
    fn unparseable_reference_range_stays_normal() {
        let mut field = numeric_field();
        field.reference_range = Some("See lab note".into());
        field.min_value = None;
        field.max_value = None;
        let result = validate_value("999.0", &field);
        assert!(result.is_valid);
        assert_eq!(result.status, ValidationStatus::Normal);
        assert!(result.message.is_empty());
    }

    #[test]
    fn open_ended_range_only_warns_below() {
        let mut field = numeric_field();
        field.reference_range = Some("> 40".into());
        field.min_value = None;
        field.max_value = None;
        assert_eq!(
            validate_value("35", &field).status,
            ValidationStatus::Warning
        );
        assert_eq!(
            validate_value("80", &field).status,
            ValidationStatus::Normal
        );
    }

    // ── Select membership ───────────────────────────────────────────

    #[test]
    fn select_member_is_normal() {
        for value in ["Negative", "Trace", "+4"] {
            assert!(validate_value(value, &select_field()).is_valid);
        }
    }

    #[test]
    fn select_non_member_lists_allowed_set() {
        let result = validate_value("+5", &select_field());
        assert!(!result.is_valid);
        assert!(result.message.contains("Negative"));
        assert!(result.message.contains("+4"));
    }

    // ── Length bounds ───────────────────────────────────────────────

    #[test]
    fn text_below_min_length_errors() {
        let result = validate_value("short", &text_field(Some(10), None));
        assert!(!result.is_valid);
        assert!(result.message.contains("at least 10"));
    }

    #[test]
    fn text_above_max_length_errors() {
        let long = "x".repeat(30);
        let result = validate_value(&long, &text_field(None, Some(20)));
        assert!(!result.is_valid);
        assert!(result.message.contains("not exceed 20"));
    }

    #[test]
    fn text_within_bounds_is_normal() {
        let result = validate_value("within the bounds", &text_field(Some(5), Some(50)));
        assert!(result.is_valid);
        assert_eq!(result.status, ValidationStatus::Normal);
    }
}
