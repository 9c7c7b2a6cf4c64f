//! Submission service
//!
//! Drives a fill session to completion against a set of entered values and
//! appends the result to the submission sink. The sink is append-only; the
//! core never reads a submission back except for listing.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Advance, FieldValue, FillSession, Form, ValidationFailure};
use crate::infrastructure::traits::{SubmissionRecord, SubmissionSink};

/// Result of pushing a set of answers through a form.
#[derive(Debug)]
pub enum FillOutcome {
    Submitted(SubmissionRecord),
    /// Validation stopped the session on the given step; the answers are
    /// untouched, so the caller can fix the failing fields and retry.
    Blocked {
        step: usize,
        errors: BTreeMap<String, ValidationFailure>,
    },
}

/// Service recording completed fill attempts.
pub struct SubmissionService {
    sink: Arc<dyn SubmissionSink>,
}

impl SubmissionService {
    pub fn new(sink: Arc<dyn SubmissionSink>) -> Self {
        Self { sink }
    }

    /// Walk a form step by step with the supplied answers, validating each
    /// step the way an interactive filler would, and record the submission
    /// when every step passes.
    ///
    /// A sink failure is an error, not a Blocked outcome: the answers were
    /// valid and remain intact for a retry.
    pub fn submit_answers(
        &self,
        form: &Form,
        answers: &BTreeMap<String, FieldValue>,
    ) -> ApplicationResult<FillOutcome> {
        debug!(
            "submit_answers: form={} answers={}",
            form.id,
            answers.len()
        );
        let mut session = FillSession::new(form);
        for (field_id, value) in answers {
            session.set_value(field_id.clone(), value.clone());
        }

        loop {
            match session.next() {
                Advance::Moved(_) => continue,
                Advance::AtBoundary => break,
                Advance::Blocked => {
                    return Ok(FillOutcome::Blocked {
                        step: session.current_step(),
                        errors: session.errors().clone(),
                    });
                }
            }
        }

        let data = match session.finish() {
            Ok(data) => data,
            Err(errors) => {
                // finish re-checks only the final step
                let errors = errors.clone();
                return Ok(FillOutcome::Blocked {
                    step: session.current_step(),
                    errors,
                });
            }
        };

        let record = SubmissionRecord {
            id: Uuid::new_v4().to_string(),
            form_id: data.form_id,
            title: data.title,
            data: data.data,
            submitted_at: Utc::now(),
        };
        self.sink
            .record(&record)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("record submission for form {}", record.form_id),
                source: Box::new(e),
            })?;
        Ok(FillOutcome::Submitted(record))
    }

    /// Recorded submissions, optionally narrowed to one form.
    pub fn list(&self, form_id: Option<&str>) -> ApplicationResult<Vec<SubmissionRecord>> {
        self.sink
            .list(form_id)
            .map_err(|e| ApplicationError::OperationFailed {
                context: "list submissions".to_string(),
                source: Box::new(e),
            })
    }
}
