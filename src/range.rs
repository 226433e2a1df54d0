//! Reference range parsing — turns human-written range text into a numeric
//! interval. The reference range is the clinically "normal" band, distinct
//! from the physiological min/max used for hard validation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A parsed reference range. `max` may be infinite ("> 40" style ranges).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefRange {
    pub min: f64,
    pub max: f64,
}

impl RefRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

static RE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*-\s*(\d+(?:\.\d+)?)\s*$").unwrap());
static RE_BELOW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*<\s*(\d+(?:\.\d+)?)\s*$").unwrap());
static RE_ABOVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>\s*(\d+(?:\.\d+)?)\s*$").unwrap());

/// Parse a reference range string. Handles: "12.0-17.5", "4,000-11,000",
/// "< 200", "> 40". Anything else — qualitative text ("Negative"), empty
/// strings, inverted spans — yields None, and None is a valid, silent state:
/// no numeric band is enforced downstream.
pub fn parse(text: &str) -> Option<RefRange> {
    let cleaned = text.replace(',', "");

    if let Some(caps) = RE_SPAN.captures(&cleaned) {
        let min: f64 = caps.get(1)?.as_str().parse().ok()?;
        let max: f64 = caps.get(2)?.as_str().parse().ok()?;
        if min <= max {
            return Some(RefRange { min, max });
        }
        return None;
    }
    if let Some(caps) = RE_BELOW.captures(&cleaned) {
        let max: f64 = caps.get(1)?.as_str().parse().ok()?;
        return Some(RefRange { min: 0.0, max });
    }
    if let Some(caps) = RE_ABOVE.captures(&cleaned) {
        let min: f64 = caps.get(1)?.as_str().parse().ok()?;
        return Some(RefRange {
            min,
            max: f64::INFINITY,
        });
    }
    None
}

/// Convenience for the Option-typed `reference_range` on field definitions.
pub fn parse_opt(text: Option<&str>) -> Option<RefRange> {
    text.and_then(parse)
}
