//! Form aggregate and its mutation API
//!
//! The form exclusively owns its fields and steps. Step membership has a
//! single authority: each field's `step` index. A `FormStep` stores title
//! and description only; the fields belonging to it are a computed view
//! (`Form::fields_for_step`).

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::domain::field::{Field, FieldSeed, ValidationRules};

/// A named, ordered grouping of fields for multi-page forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormStep {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FormStep {
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description,
        }
    }
}

/// Form-level presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
    pub submit_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
    pub show_progress_bar: bool,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            submit_text: "Submit".to_string(),
            redirect_url: None,
            show_progress_bar: true,
        }
    }
}

/// The aggregate a builder authors and a filler completes.
///
/// Field order is significant: it determines both builder display and
/// default fill order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<Field>,
    #[serde(default)]
    pub is_multi_step: bool,
    /// Empty iff not multi-step
    #[serde(default)]
    pub steps: Vec<FormStep>,
    #[serde(default)]
    pub settings: FormSettings,
}

/// Outcome of a mutation operation.
///
/// The builder UI may race a field removal against an in-flight edit, so
/// operations on missing targets are tolerated rather than raised. The
/// outcome is tagged so callers can decide to ignore or log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    /// Target field id does not exist; the form is unchanged
    UnknownField(String),
    /// Patch violates an invariant; the form is unchanged
    Rejected(String),
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied)
    }
}

/// Partial update for a single field. `None` means "leave as is";
/// nested records (`validation`, `options`) replace wholesale.
#[derive(Debug, Clone, Default)]
pub struct FieldPatch {
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub validation: Option<ValidationRules>,
    pub step: Option<usize>,
}

/// Shallow partial update for top-level form attributes.
#[derive(Debug, Clone, Default)]
pub struct FormPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub settings: Option<FormSettings>,
}

impl Form {
    /// Create an empty single-step form with default settings.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: "Untitled Form".to_string(),
            description: None,
            fields: Vec::new(),
            is_multi_step: false,
            steps: Vec::new(),
            settings: FormSettings::default(),
        }
    }

    /// Number of fill pages: the step count, or 1 for single-step forms.
    pub fn total_steps(&self) -> usize {
        if self.is_multi_step {
            self.steps.len().max(1)
        } else {
            1
        }
    }

    /// Computed step membership view.
    ///
    /// Single-step forms expose all fields on step 0. Multi-step fields
    /// with no assignment count as step 0.
    pub fn fields_for_step(&self, step_index: usize) -> Vec<&Field> {
        if !self.is_multi_step {
            return if step_index == 0 {
                self.fields.iter().collect()
            } else {
                Vec::new()
            };
        }
        self.fields
            .iter()
            .filter(|f| f.step.unwrap_or(0) == step_index)
            .collect()
    }

    pub fn field(&self, field_id: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    /// Append a fully-defaulted field and return its id.
    ///
    /// No other field is touched. In a multi-step form the new field lands
    /// on step 0 unless the seed says otherwise.
    pub fn add_field(&mut self, mut seed: FieldSeed) -> String {
        if self.is_multi_step && seed.step.is_none() {
            seed.step = Some(0);
        }
        let field = Field::from_seed(seed);
        let id = field.id.clone();
        debug!("add_field: type={} id={}", field.field_type, id);
        self.fields.push(field);
        id
    }

    /// Merge a patch into the addressed field.
    ///
    /// Nested `validation` and `options` replace wholesale. Patches that
    /// would leave an empty options list, reference a nonexistent step, or
    /// carry inconsistent bounds are rejected without mutating anything.
    pub fn update_field(&mut self, field_id: &str, patch: FieldPatch) -> Mutation {
        let Some(idx) = self.fields.iter().position(|f| f.id == field_id) else {
            debug!("update_field: unknown field {}", field_id);
            return Mutation::UnknownField(field_id.to_string());
        };

        if let Some(options) = &patch.options {
            if options.is_empty() {
                return Mutation::Rejected("options must not be empty".to_string());
            }
            if !self.fields[idx].field_type.has_options() {
                return Mutation::Rejected(format!(
                    "field type {} does not take options",
                    self.fields[idx].field_type
                ));
            }
        }
        if let Some(rules) = &patch.validation {
            if !rules.is_consistent() {
                return Mutation::Rejected("validation bounds inverted (min > max)".to_string());
            }
        }
        if let Some(step) = patch.step {
            if !self.is_multi_step || step >= self.steps.len() {
                return Mutation::Rejected(format!("step index {} out of range", step));
            }
        }

        let field = &mut self.fields[idx];
        if let Some(label) = patch.label {
            field.label = label;
        }
        if let Some(placeholder) = patch.placeholder {
            field.placeholder = Some(placeholder);
        }
        if let Some(help_text) = patch.help_text {
            field.help_text = Some(help_text);
        }
        if let Some(required) = patch.required {
            field.required = required;
        }
        if let Some(options) = patch.options {
            field.options = Some(options);
        }
        if let Some(rules) = patch.validation {
            field.validation = if rules.is_empty() { None } else { Some(rules) };
        }
        if let Some(step) = patch.step {
            field.step = Some(step);
        }
        Mutation::Applied
    }

    /// Delete a field. Other fields keep their step assignments.
    pub fn remove_field(&mut self, field_id: &str) -> Mutation {
        let before = self.fields.len();
        self.fields.retain(|f| f.id != field_id);
        if self.fields.len() == before {
            debug!("remove_field: unknown field {}", field_id);
            Mutation::UnknownField(field_id.to_string())
        } else {
            Mutation::Applied
        }
    }

    /// Move the field at `from` to position `to`, shifting the fields
    /// between by one. Out-of-range indices are rejected; order is never
    /// corrupted. `reorder_fields(i, i)` is a no-op.
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> Mutation {
        let len = self.fields.len();
        if from >= len || to >= len {
            return Mutation::Rejected(format!(
                "reorder indices ({}, {}) out of range for {} fields",
                from, to, len
            ));
        }
        if from != to {
            let field = self.fields.remove(from);
            self.fields.insert(to, field);
        }
        Mutation::Applied
    }

    /// Shallow-merge top-level attributes.
    pub fn update(&mut self, patch: FormPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(settings) = patch.settings {
            self.settings = settings;
        }
    }

    /// Toggle between single-step and multi-step mode.
    ///
    /// Turning multi-step on creates exactly one default step and assigns
    /// every field to it. Turning it off clears the steps and every
    /// field's step assignment, so a later re-enable starts from a clean
    /// slate (step layout is deliberately not round-tripped).
    pub fn set_multi_step(&mut self, multi: bool) {
        if multi == self.is_multi_step {
            return;
        }
        if multi {
            self.is_multi_step = true;
            self.steps = vec![FormStep::new(
                "Step 1",
                Some("First step of the form".to_string()),
            )];
            for field in &mut self.fields {
                field.step = Some(0);
            }
        } else {
            self.is_multi_step = false;
            self.steps.clear();
            for field in &mut self.fields {
                field.step = None;
            }
        }
    }

    /// Append a step to a multi-step form.
    pub fn add_step(&mut self, title: impl Into<String>, description: Option<String>) -> Mutation {
        if !self.is_multi_step {
            return Mutation::Rejected("form is not multi-step".to_string());
        }
        self.steps.push(FormStep::new(title, description));
        Mutation::Applied
    }

    /// Remove a step; fields assigned to it (or beyond) are re-pointed so
    /// every assignment stays in range.
    pub fn remove_step(&mut self, step_index: usize) -> Mutation {
        if !self.is_multi_step || step_index >= self.steps.len() {
            return Mutation::Rejected(format!("step index {} out of range", step_index));
        }
        if self.steps.len() == 1 {
            return Mutation::Rejected("cannot remove the only step".to_string());
        }
        self.steps.remove(step_index);
        for field in &mut self.fields {
            match field.step {
                Some(s) if s == step_index => field.step = Some(0),
                Some(s) if s > step_index => field.step = Some(s - 1),
                _ => {}
            }
        }
        Mutation::Applied
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}
