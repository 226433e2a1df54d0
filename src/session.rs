//! Headless form sessions — the state a form view owns: entered values,
//! touched fields, live validation, category tabs, and submission gating.
//!
//! Persistence stays outside: `submit` awaits an injected collaborator and
//! maps its rejection into a dismissable banner, never into the per-field
//! error map. Each session owns an independent form; the registry is shared
//! read-only data.

use std::collections::{BTreeMap, BTreeSet};
use std::future::Future;

use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::forms::{report, request, FormValidationSummary, GENERAL_ERROR_KEY};
use crate::mask;
use crate::models::{FieldDefinition, ReportForm, RequestForm};
use crate::registry::{Registry, RegistryError};
use crate::validate::{validate_value, ValidationResult};

/// Banner text when a rejection carries no usable message.
const GENERIC_SUBMIT_ERROR: &str = "Submission failed. Please try again.";

/// Where a session is in its lifecycle. A flat flag set, not a guarded
/// transition table — the flows here do not need one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Editing,
    Submitting,
    Failed,
    Succeeded,
}

/// Rejection from the injected submit collaborator.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct SubmitRejection {
    pub message: String,
}

impl SubmitRejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The collaborator accepted the form.
    Submitted,
    /// Validation failed; `first_error` names the field to scroll to.
    Invalid { first_error: String },
    /// The collaborator rejected; the banner holds the message.
    Rejected,
    /// A submit was already in flight; nothing was done.
    InFlight,
}

// ─── Lab-report entry ─────────────────────────────────────────────────────────

/// Session behind the lab-report entry form: component values grouped into
/// category tabs, with live per-field feedback.
#[derive(Debug, Clone)]
pub struct ReportSession {
    id: Uuid,
    form: ReportForm,
    components: Vec<FieldDefinition>,
    categories: Vec<String>,
    active_category: String,
    touched: BTreeSet<String>,
    phase: SessionPhase,
    banner: Option<String>,
}

impl ReportSession {
    pub fn new(registry: &Registry, test_type: &str) -> Result<Self, RegistryError> {
        let def = registry
            .get(test_type)
            .ok_or_else(|| RegistryError::UnknownTestType {
                key: test_type.to_string(),
            })?;
        let categories: Vec<String> = def.categories().iter().map(|c| c.to_string()).collect();
        let active_category = categories.first().cloned().unwrap_or_default();
        Ok(Self {
            id: Uuid::new_v4(),
            form: ReportForm::new(test_type),
            components: def.components.clone(),
            categories,
            active_category,
            touched: BTreeSet::new(),
            phase: SessionPhase::Editing,
            banner: None,
        })
    }

    /// Start from existing values, e.g. when amending a draft report.
    pub fn with_initial(
        registry: &Registry,
        test_type: &str,
        initial: BTreeMap<String, String>,
    ) -> Result<Self, RegistryError> {
        let mut session = Self::new(registry, test_type)?;
        for (name, value) in initial {
            session.set_value(&name, &value);
        }
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &ReportForm {
        &self.form
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    // ── Category tabs ──

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    pub fn select_category(&mut self, name: &str) -> bool {
        if self.categories.iter().any(|c| c == name) {
            self.active_category = name.to_string();
            return true;
        }
        false
    }

    /// Components on the active tab, in catalogue order.
    pub fn active_components(&self) -> Vec<&FieldDefinition> {
        self.components
            .iter()
            .filter(|c| c.category == self.active_category)
            .collect()
    }

    // ── Editing ──

    /// Mask and store a component value. Unknown names are ignored.
    pub fn set_value(&mut self, name: &str, raw: &str) {
        let Some(component) = self.components.iter().find(|c| c.name == name) else {
            tracing::debug!(session = %self.id, component = %name, "Ignoring unknown component");
            return;
        };
        let masked = mask::mask_value(
            raw,
            component.field_type,
            component.decimal_places,
            component.max_length,
        );
        self.form.results.insert(name.to_string(), masked);
        self.edited();
    }

    pub fn set_technician_notes(&mut self, raw: &str) {
        self.form.technician_notes =
            mask::mask_text(raw, Some(config::TECHNICIAN_NOTES_MAX_CHARS));
        self.edited();
    }

    pub fn set_completed_at(&mut self, value: &str) {
        self.form.completed_at = value.to_string();
        self.edited();
    }

    pub fn blur(&mut self, name: &str) {
        self.touched.insert(name.to_string());
    }

    pub fn touch_all(&mut self) {
        for component in &self.components {
            self.touched.insert(component.name.clone());
        }
        self.touched.insert("technician_notes".to_string());
        self.touched.insert("completed_at".to_string());
        self.touched.insert(GENERAL_ERROR_KEY.to_string());
    }

    // ── Feedback ──

    /// Live classification of one component's current value.
    pub fn field_result(&self, name: &str) -> Option<ValidationResult> {
        let component = self.components.iter().find(|c| c.name == name)?;
        Some(validate_value(self.form.result(name), component))
    }

    /// Static advisory text for a component, shown regardless of value.
    pub fn advisory(&self, name: &str) -> Option<&str> {
        self.components
            .iter()
            .find(|c| c.name == name)?
            .warning
            .as_deref()
    }

    /// Characters left before the component's cap, for live counters.
    pub fn remaining_chars(&self, name: &str) -> Option<usize> {
        let component = self.components.iter().find(|c| c.name == name)?;
        component.remaining_chars(self.form.result(name))
    }

    /// Error text for a field, but only once the user has touched it.
    pub fn visible_error(&self, name: &str) -> Option<String> {
        if !self.touched.contains(name) {
            return None;
        }
        self.summary().errors.get(name).cloned()
    }

    pub fn summary(&self) -> FormValidationSummary {
        report::summarize(&self.form, &self.components)
    }

    // ── Submission ──

    /// Final validation, then hand the form to the injected collaborator.
    /// The phase is restored on every path; a submit in flight is awaited to
    /// completion and never raced by a second one.
    pub async fn submit<F, Fut>(&mut self, submit_fn: F) -> SubmitOutcome
    where
        F: FnOnce(ReportForm) -> Fut,
        Fut: Future<Output = Result<(), SubmitRejection>>,
    {
        if self.phase == SessionPhase::Submitting {
            return SubmitOutcome::InFlight;
        }

        self.touch_all();
        let summary = self.summary();
        if !summary.is_valid {
            tracing::warn!(
                session = %self.id,
                test_type = %self.form.test_type,
                error_count = summary.errors.len(),
                "Report submit blocked by validation errors"
            );
            self.phase = SessionPhase::Editing;
            let first_error = summary
                .first_error_field()
                .unwrap_or(GENERAL_ERROR_KEY)
                .to_string();
            return SubmitOutcome::Invalid { first_error };
        }

        self.phase = SessionPhase::Submitting;
        self.banner = None;
        match submit_fn(self.form.clone()).await {
            Ok(()) => {
                self.phase = SessionPhase::Succeeded;
                tracing::info!(
                    session = %self.id,
                    test_type = %self.form.test_type,
                    "Report submitted"
                );
                SubmitOutcome::Submitted
            }
            Err(rejection) => {
                self.phase = SessionPhase::Failed;
                let message = if rejection.message.trim().is_empty() {
                    GENERIC_SUBMIT_ERROR.to_string()
                } else {
                    rejection.message
                };
                tracing::error!(session = %self.id, error = %message, "Report submit rejected");
                self.banner = Some(message);
                SubmitOutcome::Rejected
            }
        }
    }

    fn edited(&mut self) {
        if self.phase == SessionPhase::Failed {
            self.phase = SessionPhase::Editing;
        }
    }
}

// ─── Test-request intake ──────────────────────────────────────────────────────

/// Session behind the test-request intake form. Borrows the registry: the
/// cross-field rules need the full catalogue, not just one definition.
#[derive(Debug, Clone)]
pub struct RequestSession<'a> {
    id: Uuid,
    registry: &'a Registry,
    form: RequestForm,
    touched: BTreeSet<String>,
    phase: SessionPhase,
    banner: Option<String>,
}

impl<'a> RequestSession<'a> {
    pub fn new(registry: &'a Registry, test_type: &str) -> Result<Self, RegistryError> {
        if registry.get(test_type).is_none() {
            return Err(RegistryError::UnknownTestType {
                key: test_type.to_string(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4(),
            registry,
            form: RequestForm::new(test_type),
            touched: BTreeSet::new(),
            phase: SessionPhase::Editing,
            banner: None,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn form(&self) -> &RequestForm {
        &self.form
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    // ── Test-type metadata surfaced on the intake page ──

    pub fn fasting_required(&self) -> bool {
        self.registry.is_fasting_required(&self.form.test_type)
    }

    pub fn preparation_instructions(&self) -> &[String] {
        self.registry.preparation_instructions(&self.form.test_type)
    }

    pub fn body_parts(&self) -> &[String] {
        self.registry.body_parts(&self.form.test_type)
    }

    // ── Editing ──

    pub fn set_preferred_date(&mut self, value: &str) {
        self.form.preferred_date = value.to_string();
        self.edited();
    }

    pub fn set_preferred_time(&mut self, value: &str) {
        self.form.preferred_time = value.to_string();
        self.edited();
    }

    pub fn set_priority(&mut self, value: &str) {
        self.form.priority = value.to_string();
        self.edited();
    }

    pub fn set_notes(&mut self, raw: &str) {
        self.form.notes = mask::mask_text(raw, Some(config::REQUEST_NOTES_MAX_CHARS));
        self.edited();
    }

    pub fn set_clinical_indication(&mut self, raw: &str) {
        self.form.clinical_indication =
            mask::mask_text(raw, Some(config::CLINICAL_INDICATION_MAX_CHARS));
        self.edited();
    }

    pub fn set_body_part(&mut self, value: &str) {
        self.form.body_part = value.to_string();
        self.edited();
    }

    pub fn acknowledge_fasting(&mut self, acknowledged: bool) {
        self.form.fasting_acknowledged = acknowledged;
        self.edited();
    }

    pub fn answer_contrast(&mut self, with_contrast: bool) {
        self.form.with_contrast = Some(with_contrast);
        self.edited();
    }

    /// Extra intake fields named by the test type's `required_fields`.
    pub fn set_field(&mut self, name: &str, raw: &str) {
        self.form
            .fields
            .insert(name.to_string(), mask::mask_text(raw, None));
        self.edited();
    }

    pub fn blur(&mut self, name: &str) {
        self.touched.insert(name.to_string());
    }

    pub fn touch_all(&mut self) {
        let registry = self.registry;
        for name in registry.required_fields(&self.form.test_type) {
            self.touched.insert(name.clone());
        }
        for name in [
            "test_type",
            "preferred_date",
            "preferred_time",
            "priority",
            "notes",
            "fasting_acknowledged",
            "body_part",
            "with_contrast",
            "clinical_indication",
        ] {
            self.touched.insert(name.to_string());
        }
    }

    // ── Feedback ──

    pub fn visible_error(&self, name: &str) -> Option<String> {
        if !self.touched.contains(name) {
            return None;
        }
        self.summary().errors.get(name).cloned()
    }

    pub fn summary(&self) -> FormValidationSummary {
        request::summarize(&self.form, self.registry)
    }

    // ── Submission ──

    pub async fn submit<F, Fut>(&mut self, submit_fn: F) -> SubmitOutcome
    where
        F: FnOnce(RequestForm) -> Fut,
        Fut: Future<Output = Result<(), SubmitRejection>>,
    {
        if self.phase == SessionPhase::Submitting {
            return SubmitOutcome::InFlight;
        }

        self.touch_all();
        let summary = self.summary();
        if !summary.is_valid {
            tracing::warn!(
                session = %self.id,
                test_type = %self.form.test_type,
                error_count = summary.errors.len(),
                "Request submit blocked by validation errors"
            );
            self.phase = SessionPhase::Editing;
            let first_error = summary
                .first_error_field()
                .unwrap_or(GENERAL_ERROR_KEY)
                .to_string();
            return SubmitOutcome::Invalid { first_error };
        }

        self.phase = SessionPhase::Submitting;
        self.banner = None;
        match submit_fn(self.form.clone()).await {
            Ok(()) => {
                self.phase = SessionPhase::Succeeded;
                tracing::info!(
                    session = %self.id,
                    test_type = %self.form.test_type,
                    "Request submitted"
                );
                SubmitOutcome::Submitted
            }
            Err(rejection) => {
                self.phase = SessionPhase::Failed;
                let message = if rejection.message.trim().is_empty() {
                    GENERIC_SUBMIT_ERROR.to_string()
                } else {
                    rejection.message
                };
                tracing::error!(session = %self.id, error = %message, "Request submit rejected");
                self.banner = Some(message);
                SubmitOutcome::Rejected
            }
        }
    }

    fn edited(&mut self) {
        if self.phase == SessionPhase::Failed {
            self.phase = SessionPhase::Editing;
        }
    }
}
