//! Validation engine shared by builder preview and filler
//!
//! Pure functions: a field definition plus a candidate value yield zero or
//! one failure. Evaluation stops at the first failing rule:
//! required → length → numeric range → pattern → type format.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::domain::field::{Field, FieldType, FieldValue};

/// Which rule fired, so callers can localize independently of the
/// bundled message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    MinLength,
    MaxLength,
    Min,
    Max,
    Pattern,
    Email,
    Phone,
}

/// A single failed rule with its human-readable message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub rule: Rule,
    pub message: String,
}

impl ValidationFailure {
    fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[1-9]\d{0,15}$").expect("valid phone regex"))
}

/// Validate one candidate value against one field definition.
///
/// `None` for an absent value. Returns the first failing rule, or `None`
/// when the value is valid. Non-required empty values always pass.
pub fn validate(field: &Field, value: Option<&FieldValue>) -> Option<ValidationFailure> {
    let empty = value.map(FieldValue::is_empty).unwrap_or(true);

    if field.required && empty {
        return Some(ValidationFailure::new(
            Rule::Required,
            "This field is required",
        ));
    }
    if empty {
        return None;
    }
    let value = value.expect("non-empty value present");

    if let Some(rules) = &field.validation {
        if let Some(text) = value.as_text() {
            let len = text.chars().count();
            if let Some(min) = rules.min_length {
                if len < min {
                    return Some(ValidationFailure::new(
                        Rule::MinLength,
                        format!("Please enter at least {} characters", min),
                    ));
                }
            }
            if let Some(max) = rules.max_length {
                if len > max {
                    return Some(ValidationFailure::new(
                        Rule::MaxLength,
                        format!("Maximum allowed length is {} characters", max),
                    ));
                }
            }
            if let Some(pattern) = &rules.pattern {
                // An unparseable pattern is a builder mistake; treat it as
                // non-matching rather than panicking mid-fill.
                let matched = Regex::new(pattern)
                    .map(|re| re.is_match(text))
                    .unwrap_or(false);
                if !matched {
                    return Some(ValidationFailure::new(Rule::Pattern, "Invalid format"));
                }
            }
        }

        if let Some(n) = value.as_number() {
            if let Some(min) = rules.min {
                if n < min {
                    return Some(ValidationFailure::new(
                        Rule::Min,
                        format!("Value must be at least {}", min),
                    ));
                }
            }
            if let Some(max) = rules.max {
                if n > max {
                    return Some(ValidationFailure::new(
                        Rule::Max,
                        format!("Value cannot exceed {}", max),
                    ));
                }
            }
        }
    }

    match field.field_type {
        FieldType::Email => {
            if let Some(text) = value.as_text() {
                if !email_regex().is_match(text) {
                    return Some(ValidationFailure::new(
                        Rule::Email,
                        "Please enter a valid email address",
                    ));
                }
            }
        }
        FieldType::Phone => {
            if let Some(text) = value.as_text() {
                let stripped: String = text
                    .chars()
                    .filter(|c| !matches!(c, '-' | ' ' | '(' | ')'))
                    .collect();
                if !phone_regex().is_match(&stripped) {
                    return Some(ValidationFailure::new(
                        Rule::Phone,
                        "Please enter a valid phone number",
                    ));
                }
            }
        }
        _ => {}
    }

    None
}

/// Validate a set of fields against entered values.
///
/// Returns only the failing fields, keyed by field id. The step is valid
/// iff the map is empty.
pub fn validate_step<'a, I>(
    fields: I,
    values: &BTreeMap<String, FieldValue>,
) -> BTreeMap<String, ValidationFailure>
where
    I: IntoIterator<Item = &'a Field>,
{
    let mut failures = BTreeMap::new();
    for field in fields {
        if let Some(failure) = validate(field, values.get(&field.id)) {
            failures.insert(field.id.clone(), failure);
        }
    }
    failures
}
