//! Labform — configuration-driven laboratory test-request and lab-report
//! forms.
//!
//! The registry maps a test-type key to its request requirements and report
//! components; the validator classifies entered values against physiological
//! bounds and reference ranges; masking keeps raw input clean; the form
//! modules aggregate everything into error maps; and the sessions own the
//! state a form view needs, delegating persistence to an injected async
//! collaborator.

pub mod config;
pub mod forms;
pub mod mask;
pub mod models;
pub mod range;
pub mod registry;
pub mod session;
pub mod validate;

pub use forms::{is_form_valid, ErrorMap, FormValidationSummary};
pub use models::{
    FieldDefinition, FieldType, Priority, ReportForm, RequestForm, TestTypeDefinition,
    TestTypeSummary, ValidationStatus,
};
pub use range::RefRange;
pub use registry::{Registry, RegistryError};
pub use session::{
    ReportSession, RequestSession, SessionPhase, SubmitOutcome, SubmitRejection,
};
pub use validate::{validate_value, ValidationResult};
