/// Application-level constants
pub const APP_NAME: &str = "Labform";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How far ahead a test may be scheduled, in days from today.
pub const SCHEDULING_WINDOW_DAYS: i64 = 90;

/// Earliest bookable hour for sample collection / imaging (inclusive).
pub const WORKING_DAY_START_HOUR: u32 = 8;

/// Latest bookable hour (inclusive, on the hour).
pub const WORKING_DAY_END_HOUR: u32 = 17;

/// Maximum length of the free-text notes on a test request.
pub const REQUEST_NOTES_MAX_CHARS: usize = 500;

/// Technician notes on a lab report, when present.
pub const TECHNICIAN_NOTES_MIN_CHARS: usize = 10;
pub const TECHNICIAN_NOTES_MAX_CHARS: usize = 1_000;

/// Clinical indication on imaging requests.
pub const CLINICAL_INDICATION_MIN_CHARS: usize = 10;
pub const CLINICAL_INDICATION_MAX_CHARS: usize = 500;

/// Test types that produce a narrative imaging report.
pub const IMAGING_TEST_TYPES: &[&str] = &["xray", "mri", "ct", "ultrasound"];

/// Test types where a contrast yes/no must be answered explicitly.
pub const CONTRAST_TEST_TYPES: &[&str] = &["mri", "ct"];

// TODO: declare these elevated minimums as `min_length` on the Impression and
// Findings entries in resources/test_types.json and drop the name matching in
// forms::report.
pub const IMPRESSION_COMPONENT: &str = "Impression";
pub const IMPRESSION_MIN_CHARS: usize = 20;
pub const FINDINGS_COMPONENT: &str = "Findings";
pub const FINDINGS_MIN_CHARS: usize = 30;

/// Punctuation permitted in text fields, alongside alphanumerics and whitespace.
pub const TEXT_ALLOWED_PUNCTUATION: &str = ".,;:!?'\"()-";

/// Whether a test type produces a narrative imaging report.
pub fn is_imaging(test_type: &str) -> bool {
    IMAGING_TEST_TYPES.contains(&test_type)
}

/// Whether a test type requires an explicit contrast decision on the request.
pub fn requires_contrast_choice(test_type: &str) -> bool {
    CONTRAST_TEST_TYPES.contains(&test_type)
}
