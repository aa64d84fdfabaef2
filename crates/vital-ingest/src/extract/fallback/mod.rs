//! Deterministic fallback extraction.
//!
//! Ordered lists of named regex rules, one list per domain. For each field,
//! the first rule that matches wins; later matches for the same field are
//! ignored. Patterns that fail to compile simply never match
//! (`LazyLock<Option<Regex>>`), so a bad pattern degrades instead of
//! panicking at startup.

mod bloodwork;
mod dexa;

pub use bloodwork::extract_bloodwork;
pub use dexa::extract_dexa;

use regex::Regex;
use std::sync::LazyLock;

/// A named extraction rule: canonical field id plus a pattern whose first
/// capture group is the numeric value.
pub struct PatternRule {
    pub key: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
}

/// Apply a rule list to text, invoking `set` with (key, value) for the
/// first match per field. `set` returns false when the field was already
/// defined, which keeps first-match-wins semantics.
pub(crate) fn apply_rules(rules: &[PatternRule], text: &str, set: &mut dyn FnMut(&str, f64) -> bool) {
    for rule in rules {
        let Some(regex) = rule.regex.as_ref() else {
            continue;
        };
        let Some(captures) = regex.captures(text) else {
            continue;
        };
        if let Some(value) = captures.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
            set(rule.key, value);
        }
    }
}

macro_rules! marker_pattern {
    ($name:ident, $regex_str:expr) => {
        pub(crate) static $name: std::sync::LazyLock<Option<regex::Regex>> =
            std::sync::LazyLock::new(|| regex::Regex::new($regex_str).ok());
    };
}
pub(crate) use marker_pattern;
