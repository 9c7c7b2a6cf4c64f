//! Tests for the submission service

use std::collections::BTreeMap;
use std::io;
use std::sync::Arc;

use formforge::application::services::{FillOutcome, SubmissionService};
use formforge::application::ApplicationError;
use formforge::domain::{FieldPatch, FieldSeed, FieldType, FieldValue, Form};
use formforge::infrastructure::traits::{MemorySubmissionSink, SubmissionRecord, SubmissionSink};
use formforge::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// Sink whose writes always fail, for exercising the error path.
struct BrokenSink;

impl SubmissionSink for BrokenSink {
    fn record(&self, _record: &SubmissionRecord) -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
    }

    fn list(&self, _form_id: Option<&str>) -> io::Result<Vec<SubmissionRecord>> {
        Ok(Vec::new())
    }
}

/// Two-step form: required name on step 0, required email on step 1.
fn two_step_form() -> (Form, String, String) {
    let mut form = Form::new();
    form.set_multi_step(true);
    form.add_step("Contact", None);
    let name = form.add_field(FieldSeed {
        field_type: Some(FieldType::Text),
        required: true,
        ..Default::default()
    });
    let email = form.add_field(FieldSeed {
        field_type: Some(FieldType::Email),
        required: true,
        ..Default::default()
    });
    form.update_field(
        &email,
        FieldPatch {
            step: Some(1),
            ..Default::default()
        },
    );
    (form, name, email)
}

fn answers(pairs: &[(&str, &str)]) -> BTreeMap<String, FieldValue> {
    pairs
        .iter()
        .map(|(id, v)| (id.to_string(), FieldValue::Text(v.to_string())))
        .collect()
}

#[test]
fn given_complete_answers_when_submitting_then_recorded_with_form_metadata() {
    // Arrange
    let sink = Arc::new(MemorySubmissionSink::default());
    let svc = SubmissionService::new(sink.clone());
    let (form, name, email) = two_step_form();

    // Act
    let outcome = svc
        .submit_answers(&form, &answers(&[(&name, "Ada"), (&email, "ada@example.com")]))
        .unwrap();

    // Assert
    let FillOutcome::Submitted(record) = outcome else {
        panic!("expected submission, got {:?}", outcome);
    };
    assert_eq!(record.form_id, form.id);
    assert_eq!(record.title, form.title);
    assert_eq!(record.data.len(), 2);

    let stored = sink.list(Some(&form.id)).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, record.id);
}

#[test]
fn given_missing_first_step_answer_when_submitting_then_blocked_on_step_zero() {
    let svc = SubmissionService::new(Arc::new(MemorySubmissionSink::default()));
    let (form, _, email) = two_step_form();

    let outcome = svc
        .submit_answers(&form, &answers(&[(&email, "ada@example.com")]))
        .unwrap();

    let FillOutcome::Blocked { step, errors } = outcome else {
        panic!("expected blocked outcome");
    };
    assert_eq!(step, 0);
    assert_eq!(errors.len(), 1);
}

#[test]
fn given_invalid_final_step_answer_when_submitting_then_blocked_on_last_step() {
    let sink = Arc::new(MemorySubmissionSink::default());
    let svc = SubmissionService::new(sink.clone());
    let (form, name, email) = two_step_form();

    let outcome = svc
        .submit_answers(&form, &answers(&[(&name, "Ada"), (&email, "not-an-email")]))
        .unwrap();

    let FillOutcome::Blocked { step, errors } = outcome else {
        panic!("expected blocked outcome");
    };
    assert_eq!(step, 1);
    assert!(errors.contains_key(&email));
    assert!(sink.list(None).unwrap().is_empty());
}

#[test]
fn given_failing_sink_when_submitting_valid_answers_then_error_not_blocked() {
    // Valid answers plus a broken disk must surface as an operational
    // error, never as a validation outcome.
    let svc = SubmissionService::new(Arc::new(BrokenSink));
    let (form, name, email) = two_step_form();

    let result =
        svc.submit_answers(&form, &answers(&[(&name, "Ada"), (&email, "ada@example.com")]));

    assert!(matches!(
        result,
        Err(ApplicationError::OperationFailed { .. })
    ));
}

#[test]
fn given_single_step_form_when_submitting_then_one_pass_validation() {
    let sink = Arc::new(MemorySubmissionSink::default());
    let svc = SubmissionService::new(sink.clone());
    let mut form = Form::new();
    let id = form.add_field(FieldSeed {
        field_type: Some(FieldType::Text),
        required: true,
        ..Default::default()
    });

    let outcome = svc.submit_answers(&form, &answers(&[(&id, "hi")])).unwrap();

    assert!(matches!(outcome, FillOutcome::Submitted(_)));
    assert_eq!(sink.list(None).unwrap().len(), 1);
}

#[test]
fn given_submissions_for_two_forms_when_listing_filtered_then_only_matching() {
    let sink = Arc::new(MemorySubmissionSink::default());
    let svc = SubmissionService::new(sink);
    let (form_a, name_a, email_a) = two_step_form();
    let (form_b, name_b, email_b) = two_step_form();

    svc.submit_answers(
        &form_a,
        &answers(&[(&name_a, "Ada"), (&email_a, "ada@example.com")]),
    )
    .unwrap();
    svc.submit_answers(
        &form_b,
        &answers(&[(&name_b, "Bob"), (&email_b, "bob@example.com")]),
    )
    .unwrap();

    let only_a = svc.list(Some(&form_a.id)).unwrap();
    assert_eq!(only_a.len(), 1);
    assert_eq!(only_a[0].form_id, form_a.id);
    assert_eq!(svc.list(None).unwrap().len(), 2);
}
