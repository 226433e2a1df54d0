//! Input masking — cleans raw input before it reaches form state, and
//! filters keystrokes before they are inserted.
//!
//! Masking runs at two layers on purpose: the keypress filter rejects
//! disallowed characters up front, and the post-hoc mask cleans whatever
//! arrives anyway (paste and IME input never go through keydown). Both
//! functions are idempotent.

use crate::config::TEXT_ALLOWED_PUNCTUATION;
use crate::models::FieldType;

/// Keep digits, at most one `.`, and at most one leading `-`; truncate the
/// fractional part to `decimal_places` when given.
pub fn mask_numeric(raw: &str, decimal_places: Option<u8>) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut seen_dot = false;

    for c in raw.chars() {
        match c {
            '0'..='9' => out.push(c),
            '.' if !seen_dot => {
                seen_dot = true;
                out.push(c);
            }
            '-' if out.is_empty() => out.push(c),
            _ => {}
        }
    }

    if let (Some(dp), Some(dot)) = (decimal_places, out.find('.')) {
        out.truncate(dot + 1 + dp as usize);
    }
    out
}

/// Keep alphanumerics, whitespace, and common punctuation; truncate to
/// `max_length` characters when given.
pub fn mask_text(raw: &str, max_length: Option<usize>) -> String {
    let mut out: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || TEXT_ALLOWED_PUNCTUATION.contains(*c))
        .collect();

    if let Some(max) = max_length {
        if out.chars().count() > max {
            out = out.chars().take(max).collect();
        }
    }
    out
}

/// Apply the mask appropriate to a field type.
pub fn mask_value(
    raw: &str,
    field_type: FieldType,
    decimal_places: Option<u8>,
    max_length: Option<usize>,
) -> String {
    match field_type {
        FieldType::Number => mask_numeric(raw, decimal_places),
        FieldType::Text | FieldType::Textarea => mask_text(raw, max_length),
        // Select values come from the option list, not the keyboard.
        FieldType::Select => raw.to_string(),
    }
}

/// A keystroke as seen by the keypress filter. Control keys are modeled
/// explicitly so they are always permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Delete,
    Tab,
    Enter,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
}

/// Decide whether a keystroke may be inserted into a field holding `current`.
/// Control keys always pass. For numeric fields, a second decimal point or a
/// non-leading minus sign is rejected.
pub fn key_allowed(field_type: FieldType, current: &str, key: Key) -> bool {
    let c = match key {
        Key::Char(c) => c,
        _ => return true,
    };

    match field_type {
        FieldType::Number => match c {
            '0'..='9' => true,
            '.' => !current.contains('.'),
            '-' => current.is_empty(),
            _ => false,
        },
        FieldType::Text | FieldType::Textarea => {
            c.is_ascii_alphanumeric() || c.is_whitespace() || TEXT_ALLOWED_PUNCTUATION.contains(c)
        }
        FieldType::Select => true,
    }
}
