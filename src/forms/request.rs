//! Test-request intake validation: required fields, scheduling rules, and
//! the per-modality conditionals (fasting, body part, contrast, indication).

use chrono::{Days, Local, NaiveDate, NaiveTime, Timelike};

use crate::config;
use crate::models::{Priority, RequestForm};
use crate::registry::Registry;

use super::{humanize, ErrorMap, FormValidationSummary};

/// Validate a request form against today's date.
pub fn validate_request_form(form: &RequestForm, registry: &Registry) -> ErrorMap {
    validate_request_form_at(form, registry, Local::now().date_naive())
}

/// Validation core with an injectable "today".
pub fn validate_request_form_at(
    form: &RequestForm,
    registry: &Registry,
    today: NaiveDate,
) -> ErrorMap {
    let mut errors = ErrorMap::new();

    let Some(test_type) = registry.get(&form.test_type) else {
        errors.insert("test_type".into(), "Select a test type".into());
        check_schedule(form, today, &mut errors);
        check_priority(form, &mut errors);
        check_notes(form, &mut errors);
        return errors;
    };

    for name in &test_type.required_fields {
        if form.value_of(name).trim().is_empty() {
            errors.insert(name.clone(), format!("{} is required", humanize(name)));
        }
    }

    check_schedule(form, today, &mut errors);
    check_priority(form, &mut errors);
    check_notes(form, &mut errors);

    if test_type.fasting_required && !form.fasting_acknowledged {
        errors.insert(
            "fasting_acknowledged".into(),
            "Confirm the patient has been advised of the fasting requirement".into(),
        );
    }

    if !test_type.body_parts.is_empty() {
        let chosen = form.body_part.trim();
        if chosen.is_empty() {
            errors.insert("body_part".into(), "Select a body part".into());
        } else if !test_type.body_parts.iter().any(|p| p == chosen) {
            errors.insert(
                "body_part".into(),
                format!("Body part must be one of: {}", test_type.body_parts.join(", ")),
            );
        }
    }

    // An explicit "no" is acceptable; an unanswered question is not.
    if config::requires_contrast_choice(&form.test_type) && form.with_contrast.is_none() {
        errors.insert(
            "with_contrast".into(),
            "Specify whether contrast is required".into(),
        );
    }

    if config::is_imaging(&form.test_type) {
        let len = form.clinical_indication.trim().chars().count();
        if len < config::CLINICAL_INDICATION_MIN_CHARS {
            errors.insert(
                "clinical_indication".into(),
                format!(
                    "Clinical indication must be at least {} characters",
                    config::CLINICAL_INDICATION_MIN_CHARS
                ),
            );
        } else if len > config::CLINICAL_INDICATION_MAX_CHARS {
            errors.insert(
                "clinical_indication".into(),
                format!(
                    "Clinical indication must not exceed {} characters",
                    config::CLINICAL_INDICATION_MAX_CHARS
                ),
            );
        }
    }

    errors
}

/// Error map plus aggregate flags. Request forms carry no reference ranges,
/// so warnings never arise here.
pub fn summarize(form: &RequestForm, registry: &Registry) -> FormValidationSummary {
    FormValidationSummary::from_parts(validate_request_form(form, registry), false)
}

fn check_schedule(form: &RequestForm, today: NaiveDate, errors: &mut ErrorMap) {
    let date_text = form.preferred_date.trim();
    if !date_text.is_empty() {
        match NaiveDate::parse_from_str(date_text, "%Y-%m-%d") {
            Ok(date) if date < today => {
                errors.insert(
                    "preferred_date".into(),
                    "Preferred date cannot be in the past".into(),
                );
            }
            Ok(date)
                if date
                    > today
                        .checked_add_days(Days::new(config::SCHEDULING_WINDOW_DAYS as u64))
                        .unwrap_or(NaiveDate::MAX) =>
            {
                errors.insert(
                    "preferred_date".into(),
                    format!(
                        "Preferred date must be within {} days of today",
                        config::SCHEDULING_WINDOW_DAYS
                    ),
                );
            }
            Ok(_) => {}
            Err(_) => {
                errors.insert(
                    "preferred_date".into(),
                    "Enter a valid date (YYYY-MM-DD)".into(),
                );
            }
        }
    }

    let time_text = form.preferred_time.trim();
    if !time_text.is_empty() {
        match NaiveTime::parse_from_str(time_text, "%H:%M") {
            Ok(time) => {
                let minutes = time.hour() * 60 + time.minute();
                let open = config::WORKING_DAY_START_HOUR * 60;
                let close = config::WORKING_DAY_END_HOUR * 60;
                if minutes < open || minutes > close {
                    errors.insert(
                        "preferred_time".into(),
                        format!(
                            "Choose a time between {:02}:00 and {:02}:00",
                            config::WORKING_DAY_START_HOUR,
                            config::WORKING_DAY_END_HOUR
                        ),
                    );
                }
            }
            Err(_) => {
                errors.insert("preferred_time".into(), "Enter a valid time (HH:MM)".into());
            }
        }
    }
}

fn check_priority(form: &RequestForm, errors: &mut ErrorMap) {
    let priority = form.priority.trim();
    if !priority.is_empty() && priority.parse::<Priority>().is_err() {
        errors.insert(
            "priority".into(),
            "Priority must be routine, normal, urgent, or stat".into(),
        );
    }
}

fn check_notes(form: &RequestForm, errors: &mut ErrorMap) {
    if form.notes.chars().count() > config::REQUEST_NOTES_MAX_CHARS {
        errors.insert(
            "notes".into(),
            format!(
                "Notes must not exceed {} characters",
                config::REQUEST_NOTES_MAX_CHARS
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::is_form_valid;

    const TODAY: &str = "2026-08-28";

    fn today() -> NaiveDate {
        TODAY.parse().unwrap()
    }

    fn filled_cbc_request() -> RequestForm {
        let mut form = RequestForm::new("cbc");
        form.preferred_date = "2026-09-10".into();
        form.preferred_time = "09:30".into();
        form.priority = "routine".into();
        form.fields
            .insert("ordering_physician".into(), "Dr. Mensah".into());
        form
    }

    fn filled_mri_request() -> RequestForm {
        let mut form = RequestForm::new("mri");
        form.preferred_date = "2026-09-10".into();
        form.preferred_time = "10:00".into();
        form.priority = "urgent".into();
        form.body_part = "Brain".into();
        form.with_contrast = Some(false);
        form.clinical_indication = "Persistent morning headaches with visual aura".into();
        form
    }

    fn validate(form: &RequestForm) -> ErrorMap {
        validate_request_form_at(form, Registry::bundled(), today())
    }

    // ── Happy paths ─────────────────────────────────────────────────

    #[test]
    fn complete_cbc_request_passes() {
        let errors = validate(&filled_cbc_request());
        assert!(is_form_valid(&errors), "unexpected errors: {errors:?}");
    }

    #[test]
    fn complete_mri_request_passes() {
        let errors = validate(&filled_mri_request());
        assert!(is_form_valid(&errors), "unexpected errors: {errors:?}");
    }

    // ── Required fields ─────────────────────────────────────────────

    #[test]
    fn missing_required_field_reported_per_field() {
        let mut form = filled_cbc_request();
        form.fields.remove("ordering_physician");
        let errors = validate(&form);
        assert_eq!(
            errors.get("ordering_physician").map(String::as_str),
            Some("Ordering physician is required")
        );
    }

    #[test]
    fn blank_date_and_time_hit_required_rule() {
        let mut form = filled_cbc_request();
        form.preferred_date.clear();
        form.preferred_time = "   ".into();
        let errors = validate(&form);
        assert!(errors.contains_key("preferred_date"));
        assert!(errors.contains_key("preferred_time"));
    }

    #[test]
    fn unknown_test_type_flagged() {
        let mut form = filled_cbc_request();
        form.test_type = "ketamine_panel".into();
        let errors = validate(&form);
        assert!(errors.contains_key("test_type"));
    }

    // ── Scheduling rules ────────────────────────────────────────────

    #[test]
    fn past_date_rejected() {
        let mut form = filled_cbc_request();
        form.preferred_date = "2026-08-27".into();
        let errors = validate(&form);
        assert!(errors["preferred_date"].contains("in the past"));
    }

    #[test]
    fn today_is_allowed() {
        let mut form = filled_cbc_request();
        form.preferred_date = TODAY.into();
        assert!(!validate(&form).contains_key("preferred_date"));
    }

    #[test]
    fn date_beyond_window_rejected() {
        let mut form = filled_cbc_request();
        form.preferred_date = "2026-12-01".into(); // 95 days out
        let errors = validate(&form);
        assert!(errors["preferred_date"].contains("within 90 days"));
    }

    #[test]
    fn date_on_window_boundary_allowed() {
        let mut form = filled_cbc_request();
        form.preferred_date = "2026-11-26".into(); // exactly 90 days out
        assert!(!validate(&form).contains_key("preferred_date"));
    }

    #[test]
    fn malformed_date_rejected() {
        let mut form = filled_cbc_request();
        form.preferred_date = "28/08/2026".into();
        let errors = validate(&form);
        assert!(errors["preferred_date"].contains("valid date"));
    }

    #[test]
    fn time_outside_working_hours_rejected() {
        for time in ["07:59", "17:01", "23:00"] {
            let mut form = filled_cbc_request();
            form.preferred_time = time.into();
            let errors = validate(&form);
            assert!(
                errors.contains_key("preferred_time"),
                "{time} should be rejected"
            );
        }
    }

    #[test]
    fn working_hour_boundaries_allowed() {
        for time in ["08:00", "17:00", "12:15"] {
            let mut form = filled_cbc_request();
            form.preferred_time = time.into();
            let errors = validate(&form);
            assert!(
                !errors.contains_key("preferred_time"),
                "{time} should be allowed"
            );
        }
    }

    // ── Priority and notes ──────────────────────────────────────────

    #[test]
    fn unknown_priority_rejected() {
        let mut form = filled_cbc_request();
        form.priority = "asap".into();
        let errors = validate(&form);
        assert!(errors["priority"].contains("routine"));
    }

    #[test]
    fn all_known_priorities_accepted() {
        for priority in ["routine", "normal", "urgent", "stat"] {
            let mut form = filled_cbc_request();
            form.priority = priority.into();
            assert!(!validate(&form).contains_key("priority"));
        }
    }

    #[test]
    fn oversized_notes_rejected() {
        let mut form = filled_cbc_request();
        form.notes = "n".repeat(501);
        let errors = validate(&form);
        assert!(errors["notes"].contains("500"));
    }

    // ── Conditional rules ───────────────────────────────────────────

    #[test]
    fn fasting_test_requires_acknowledgement() {
        let mut form = filled_cbc_request();
        form.test_type = "lipid_panel".into();
        let errors = validate(&form);
        assert!(errors.contains_key("fasting_acknowledged"));

        form.fasting_acknowledged = true;
        assert!(!validate(&form).contains_key("fasting_acknowledged"));
    }

    #[test]
    fn imaging_requires_body_part() {
        let mut form = filled_mri_request();
        form.body_part.clear();
        let errors = validate(&form);
        assert_eq!(
            errors.get("body_part").map(String::as_str),
            Some("Select a body part")
        );
    }

    #[test]
    fn body_part_must_come_from_catalogue() {
        let mut form = filled_mri_request();
        form.body_part = "Tail".into();
        let errors = validate(&form);
        assert!(errors["body_part"].contains("must be one of"));
    }

    #[test]
    fn contrast_must_be_answered_not_merely_absent() {
        let mut form = filled_mri_request();
        form.with_contrast = None;
        let errors = validate(&form);
        assert!(errors.contains_key("with_contrast"));

        // An explicit "no" clears the error.
        form.with_contrast = Some(false);
        assert!(!validate(&form).contains_key("with_contrast"));
    }

    #[test]
    fn xray_needs_no_contrast_answer() {
        let mut form = filled_mri_request();
        form.test_type = "xray".into();
        form.body_part = "Chest".into();
        form.with_contrast = None;
        assert!(!validate(&form).contains_key("with_contrast"));
    }

    #[test]
    fn clinical_indication_length_enforced_for_imaging() {
        let mut form = filled_mri_request();
        form.clinical_indication = "headache".into(); // 8 chars
        let errors = validate(&form);
        assert!(errors["clinical_indication"].contains("at least 10"));

        form.clinical_indication = "x".repeat(501);
        let errors = validate(&form);
        assert!(errors["clinical_indication"].contains("not exceed 500"));
    }

    #[test]
    fn blood_tests_skip_imaging_rules() {
        let form = filled_cbc_request();
        let errors = validate(&form);
        assert!(!errors.contains_key("clinical_indication"));
        assert!(!errors.contains_key("body_part"));
    }

    #[test]
    fn summarize_reports_no_warnings_for_requests() {
        let summary = summarize(&filled_cbc_request(), Registry::bundled());
        assert!(!summary.has_warnings);
    }
}
