//! Whole-form validation — aggregates per-field checks and cross-field rules
//! into an error map. Nothing here throws; every outcome is a map entry.

pub mod report;
pub mod request;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use report::{validate_report_form, validate_report_form_at};
pub use request::{validate_request_form, validate_request_form_at};

/// Field name (or [`GENERAL_ERROR_KEY`]) → error message.
pub type ErrorMap = BTreeMap<String, String>;

/// Key for form-level errors that belong to no single field.
pub const GENERAL_ERROR_KEY: &str = "general";

/// The single submission gate: a form is valid iff its error map is empty.
pub fn is_form_valid(errors: &ErrorMap) -> bool {
    errors.is_empty()
}

/// Aggregate view over a form's validation state, recomputed on every change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormValidationSummary {
    pub errors: ErrorMap,
    pub has_errors: bool,
    /// Advisory only — warnings never block submission.
    pub has_warnings: bool,
    pub is_valid: bool,
}

impl FormValidationSummary {
    pub fn from_parts(errors: ErrorMap, has_warnings: bool) -> Self {
        let has_errors = !errors.is_empty();
        Self {
            is_valid: !has_errors,
            has_errors,
            has_warnings,
            errors,
        }
    }

    /// First offending field in map order, for scroll-into-view.
    pub fn first_error_field(&self) -> Option<&str> {
        self.errors.keys().next().map(String::as_str)
    }
}

/// "preferred_date" → "Preferred date", for error messages.
pub(crate) fn humanize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}
