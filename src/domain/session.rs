//! Fill and builder sessions
//!
//! A `FillSession` is the sequential stepper an end user walks through:
//! `next` validates the current step, `previous` never re-checks, and
//! submission is gated on the final step's fields only (earlier steps were
//! already enforced by their own `next`). A `BuilderSession` is the
//! authoring-side state: the selected-field cursor plus an exploratory
//! stepper that may jump anywhere without validation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::field::FieldValue;
use crate::domain::form::Form;
use crate::domain::validation::{validate_step, ValidationFailure};

/// Result of asking the stepper to advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given step index
    Moved(usize),
    /// Current step has failing fields; position unchanged
    Blocked,
    /// Already at the boundary; position unchanged
    AtBoundary,
}

/// The values one fill attempt produced, ready for the submission sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionData {
    pub form_id: String,
    pub title: String,
    pub data: BTreeMap<String, FieldValue>,
}

/// One end-user fill attempt over a loaded form.
///
/// The session owns its value and error maps; the form is only read.
#[derive(Debug)]
pub struct FillSession<'a> {
    form: &'a Form,
    current_step: usize,
    values: BTreeMap<String, FieldValue>,
    errors: BTreeMap<String, ValidationFailure>,
}

impl<'a> FillSession<'a> {
    pub fn new(form: &'a Form) -> Self {
        Self {
            form,
            current_step: 0,
            values: BTreeMap::new(),
            errors: BTreeMap::new(),
        }
    }

    pub fn form(&self) -> &Form {
        self.form
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn total_steps(&self) -> usize {
        self.form.total_steps()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.total_steps()
    }

    /// Completion percentage shown by the progress bar.
    pub fn progress(&self) -> f64 {
        (self.current_step + 1) as f64 / self.total_steps() as f64 * 100.0
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn errors(&self) -> &BTreeMap<String, ValidationFailure> {
        &self.errors
    }

    /// Record a value; a previously shown error for that field is cleared
    /// so the user sees feedback only after the next validation pass.
    pub fn set_value(&mut self, field_id: impl Into<String>, value: FieldValue) {
        let field_id = field_id.into();
        self.errors.remove(&field_id);
        self.values.insert(field_id, value);
    }

    /// Validate the fields on the current step, recording any failures.
    pub fn validate_current_step(&mut self) -> bool {
        let fields = self.form.fields_for_step(self.current_step);
        self.errors = validate_step(fields, &self.values);
        self.errors.is_empty()
    }

    /// Advance to the next step; blocked unless the current step validates.
    /// A no-op at the last step (submission is an action, not a state).
    pub fn next(&mut self) -> Advance {
        if !self.validate_current_step() {
            debug!(
                "next: blocked on step {} ({} failures)",
                self.current_step,
                self.errors.len()
            );
            return Advance::Blocked;
        }
        if self.is_last_step() {
            return Advance::AtBoundary;
        }
        self.current_step += 1;
        Advance::Moved(self.current_step)
    }

    /// Go back one step. Never validates; blocked only at step 0.
    pub fn previous(&mut self) -> Advance {
        if self.current_step == 0 {
            return Advance::AtBoundary;
        }
        self.current_step -= 1;
        Advance::Moved(self.current_step)
    }

    /// Validate the final step and, if clean, hand the entered values over
    /// for recording. Fields on earlier steps are not re-validated: their
    /// own `next` transitions already enforced them.
    ///
    /// On failure the entered values stay intact so the user can fix the
    /// offending fields and retry.
    pub fn finish(&mut self) -> Result<SubmissionData, &BTreeMap<String, ValidationFailure>> {
        if !self.validate_current_step() {
            return Err(&self.errors);
        }
        Ok(SubmissionData {
            form_id: self.form.id.clone(),
            title: self.form.title.clone(),
            data: self.values.clone(),
        })
    }
}

/// Authoring-side session state: the field-configuration cursor and the
/// preview stepper. Passed explicitly to whoever needs it; not part of the
/// persisted form.
#[derive(Debug, Default)]
pub struct BuilderSession {
    selected_field: Option<String>,
    preview_step: usize,
}

impl BuilderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the single selected field for the configuration panel.
    /// Selecting an id that does not exist in the form clears the cursor.
    pub fn select_field(&mut self, form: &Form, field_id: Option<&str>) {
        self.selected_field = field_id
            .filter(|id| form.field(id).is_some())
            .map(str::to_string);
    }

    pub fn selected_field(&self) -> Option<&str> {
        self.selected_field.as_deref()
    }

    pub fn preview_step(&self) -> usize {
        self.preview_step
    }

    /// Jump the preview to any step, bypassing validation. The authoring
    /// stepper is exploratory; only the filling stepper is sequential.
    pub fn jump_to(&mut self, form: &Form, step_index: usize) -> Advance {
        if step_index >= form.total_steps() {
            return Advance::AtBoundary;
        }
        self.preview_step = step_index;
        Advance::Moved(step_index)
    }
}
