//! Field model: the typed building block of a form
//!
//! A field is a plain serializable record. All behavior (validation,
//! step membership) lives elsewhere so that builder preview and filler
//! share identical logic.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The closed set of field types a form can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Select,
    Checkbox,
    Radio,
    Date,
    Email,
    Phone,
    Number,
}

impl FieldType {
    /// Lowercase name, used for default labels and placeholders.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
            FieldType::Date => "date",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Number => "number",
        }
    }

    /// Choice types carry an options list.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Radio | FieldType::Checkbox
        )
    }

    /// Types whose value is free text (length and pattern rules apply).
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            FieldType::Text | FieldType::Textarea | FieldType::Email | FieldType::Phone
        )
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional per-field validation rules.
///
/// `min_length`/`max_length`/`pattern` apply to text-like types,
/// `min`/`max` to the number type. The mutation API rejects patches
/// where min exceeds max (either pair).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRules {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ValidationRules {
    /// Check internal consistency (min ≤ max for both rule pairs).
    pub fn is_consistent(&self) -> bool {
        let lengths_ok = match (self.min_length, self.max_length) {
            (Some(lo), Some(hi)) => lo <= hi,
            _ => true,
        };
        let range_ok = match (self.min, self.max) {
            (Some(lo), Some(hi)) => lo <= hi,
            _ => true,
        };
        lengths_ok && range_ok
    }

    pub fn is_empty(&self) -> bool {
        self.min_length.is_none()
            && self.max_length.is_none()
            && self.pattern.is_none()
            && self.min.is_none()
            && self.max.is_none()
    }
}

/// One input definition within a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Unique, immutable identifier assigned at creation
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    /// Present iff the type is select/radio/checkbox; non-empty when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationRules>,
    /// Index into the form's step sequence; present iff the form is multi-step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,
}

/// What a caller supplies when adding a field; everything else is defaulted.
#[derive(Debug, Clone, Default)]
pub struct FieldSeed {
    pub field_type: Option<FieldType>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub required: bool,
    pub options: Option<Vec<String>>,
    pub validation: Option<ValidationRules>,
    pub step: Option<usize>,
}

impl FieldSeed {
    pub fn of_type(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }
}

impl Field {
    /// Build a fully-defaulted field from a seed.
    ///
    /// Defaults: label = type name, placeholder = "Enter {type}",
    /// choice types get three "Option N" options.
    pub fn from_seed(seed: FieldSeed) -> Self {
        let field_type = seed.field_type.unwrap_or(FieldType::Text);
        let options = if field_type.has_options() {
            Some(seed.options.filter(|o| !o.is_empty()).unwrap_or_else(|| {
                vec![
                    "Option 1".to_string(),
                    "Option 2".to_string(),
                    "Option 3".to_string(),
                ]
            }))
        } else {
            None
        };

        Self {
            id: Uuid::new_v4().to_string(),
            field_type,
            label: seed.label.unwrap_or_else(|| field_type.name().to_string()),
            placeholder: seed
                .placeholder
                .or_else(|| Some(format!("Enter {}", field_type.name()))),
            help_text: seed.help_text,
            required: seed.required,
            options,
            validation: seed.validation.filter(|v| !v.is_empty()),
            step: seed.step,
        }
    }
}

/// A value entered by a filler for a single field.
///
/// Multi-select checkboxes produce `Many`; dates travel as ISO-8601
/// strings in `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(f64),
    Text(String),
    Many(Vec<String>),
}

impl FieldValue {
    /// Empty means: empty string, empty array, or an unchecked flag.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Many(items) => items.is_empty(),
            FieldValue::Flag(checked) => !checked,
            FieldValue::Number(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}
