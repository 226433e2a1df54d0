//! Lab-report entry validation: per-component checks plus the report-wide
//! rules (at least one value, technician notes, completion time).

use chrono::{Local, NaiveDateTime};

use crate::config;
use crate::models::{FieldDefinition, ReportForm, ValidationStatus};
use crate::validate::validate_value;

use super::{ErrorMap, FormValidationSummary, GENERAL_ERROR_KEY};

/// Validate a report form against the current wall clock.
pub fn validate_report_form(form: &ReportForm, components: &[FieldDefinition]) -> ErrorMap {
    validate_report_form_at(form, components, Local::now().naive_local())
}

/// Validation core with an injectable "now".
pub fn validate_report_form_at(
    form: &ReportForm,
    components: &[FieldDefinition],
    now: NaiveDateTime,
) -> ErrorMap {
    let mut errors = ErrorMap::new();

    if !form.has_any_result() {
        errors.insert(
            GENERAL_ERROR_KEY.into(),
            "At least one test component must have a value".into(),
        );
    }

    // Required-presence and value rules both come from the field validator;
    // warnings are advisory and never land in the error map.
    for component in components {
        let result = validate_value(form.result(&component.name), component);
        if !result.is_valid {
            errors.insert(component.name.clone(), result.message);
        }
    }

    if config::is_imaging(&form.test_type) {
        check_narrative_minimums(form, &mut errors);
    }

    let notes_len = form.technician_notes.trim().chars().count();
    if notes_len > 0 {
        if notes_len < config::TECHNICIAN_NOTES_MIN_CHARS {
            errors.insert(
                "technician_notes".into(),
                format!(
                    "Technician notes must be at least {} characters",
                    config::TECHNICIAN_NOTES_MIN_CHARS
                ),
            );
        } else if notes_len > config::TECHNICIAN_NOTES_MAX_CHARS {
            errors.insert(
                "technician_notes".into(),
                format!(
                    "Technician notes must not exceed {} characters",
                    config::TECHNICIAN_NOTES_MAX_CHARS
                ),
            );
        }
    }

    let completed = form.completed_at.trim();
    if !completed.is_empty() {
        match NaiveDateTime::parse_from_str(completed, "%Y-%m-%d %H:%M") {
            Ok(completed_at) if completed_at > now => {
                errors.insert(
                    "completed_at".into(),
                    "Completion time cannot be in the future".into(),
                );
            }
            Ok(_) => {}
            Err(_) => {
                errors.insert(
                    "completed_at".into(),
                    "Enter a valid date and time (YYYY-MM-DD HH:MM)".into(),
                );
            }
        }
    }

    errors
}

/// Imaging narrative sections carry elevated minimum lengths, enforced by
/// component name independent of the declared `min_length`.
fn check_narrative_minimums(form: &ReportForm, errors: &mut ErrorMap) {
    for (name, min) in [
        (config::IMPRESSION_COMPONENT, config::IMPRESSION_MIN_CHARS),
        (config::FINDINGS_COMPONENT, config::FINDINGS_MIN_CHARS),
    ] {
        let value = form.result(name).trim();
        if !value.is_empty() && value.chars().count() < min {
            errors.insert(
                name.into(),
                format!("{name} must be at least {min} characters"),
            );
        }
    }
}

/// Error map plus aggregate flags, including whether any entered value sits
/// outside its reference range.
pub fn summarize(form: &ReportForm, components: &[FieldDefinition]) -> FormValidationSummary {
    let has_warnings = components.iter().any(|component| {
        let value = form.result(&component.name);
        !value.trim().is_empty()
            && validate_value(value, component).status == ValidationStatus::Warning
    });
    FormValidationSummary::from_parts(validate_report_form(form, components), has_warnings)
}
