//! Tests for the JSON-file form store and submission log

use std::collections::BTreeMap;

use chrono::Utc;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use formforge::domain::{FieldSeed, FieldType, FieldValue, Form, FormPatch};
use formforge::infrastructure::traits::{
    FormStore, JsonFormStore, JsonSubmissionLog, SubmissionRecord, SubmissionSink,
};
use formforge::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

/// The TempDir must stay alive for the duration of the test.
#[fixture]
fn store() -> (TempDir, JsonFormStore) {
    let temp = TempDir::new().unwrap();
    let store = JsonFormStore::new(temp.path());
    (temp, store)
}

#[fixture]
fn log() -> (TempDir, JsonSubmissionLog) {
    let temp = TempDir::new().unwrap();
    let log = JsonSubmissionLog::in_dir(temp.path());
    (temp, log)
}

fn titled_form(title: &str) -> Form {
    let mut form = Form::new();
    form.update(FormPatch {
        title: Some(title.to_string()),
        ..Default::default()
    });
    form.add_field(FieldSeed::of_type(FieldType::Text));
    form
}

fn sample_record(form: &Form) -> SubmissionRecord {
    let mut data = BTreeMap::new();
    data.insert(
        form.fields[0].id.clone(),
        FieldValue::Text("hello".to_string()),
    );
    SubmissionRecord {
        id: uuid::Uuid::new_v4().to_string(),
        form_id: form.id.clone(),
        title: form.title.clone(),
        data,
        submitted_at: Utc::now(),
    }
}

#[rstest]
fn given_saved_form_when_loading_by_id_then_round_trips(store: (TempDir, JsonFormStore)) {
    // Arrange
    let (temp, store) = store;
    let form = titled_form("Survey");

    // Act
    let id = store.save(&form).unwrap();
    let loaded = store.load_by_id(&id).unwrap();

    // Assert
    assert_eq!(loaded, Some(form));
    assert!(temp.path().join(format!("{}.json", id)).is_file());
}

#[rstest]
fn given_unknown_id_when_loading_then_none(store: (TempDir, JsonFormStore)) {
    let (_temp, store) = store;
    assert_eq!(store.load_by_id("missing").unwrap(), None);
}

#[rstest]
fn given_resaved_form_when_loading_then_latest_version_wins(store: (TempDir, JsonFormStore)) {
    let (_temp, store) = store;
    let mut form = titled_form("v1");
    store.save(&form).unwrap();

    form.update(FormPatch {
        title: Some("v2".to_string()),
        ..Default::default()
    });
    store.save(&form).unwrap();

    let loaded = store.load_by_id(&form.id).unwrap().unwrap();
    assert_eq!(loaded.title, "v2");
    assert_eq!(store.list_all().unwrap().len(), 1);
}

#[rstest]
fn given_several_forms_when_listing_then_sorted_summaries(store: (TempDir, JsonFormStore)) {
    let (_temp, store) = store;
    store.save(&titled_form("Beta")).unwrap();
    store.save(&titled_form("Alpha")).unwrap();

    let summaries = store.list_all().unwrap();

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].title, "Alpha");
    assert_eq!(summaries[1].title, "Beta");
    assert_eq!(summaries[0].field_count, 1);
}

#[rstest]
fn given_submission_log_in_storage_dir_when_listing_forms_then_log_not_counted(
    store: (TempDir, JsonFormStore),
) {
    // Arrange: store and log share the directory
    let (temp, store) = store;
    let log = JsonSubmissionLog::in_dir(temp.path());
    let form = titled_form("Survey");
    store.save(&form).unwrap();
    log.record(&sample_record(&form)).unwrap();

    // Act
    let summaries = store.list_all().unwrap();

    // Assert
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, form.id);
}

#[test]
fn given_empty_directory_when_listing_then_empty_vec() {
    let temp = TempDir::new().unwrap();
    let store = JsonFormStore::new(temp.path().join("never-created"));
    assert!(store.list_all().unwrap().is_empty());
}

#[rstest]
fn given_saved_form_when_deleting_then_true_then_false(store: (TempDir, JsonFormStore)) {
    let (_temp, store) = store;
    let id = store.save(&titled_form("Doomed")).unwrap();

    assert!(store.delete(&id).unwrap());
    assert!(!store.delete(&id).unwrap());
    assert_eq!(store.load_by_id(&id).unwrap(), None);
}

#[rstest]
fn given_two_records_when_appending_then_log_preserves_order(log: (TempDir, JsonSubmissionLog)) {
    // Arrange
    let (_temp, log) = log;
    let form = titled_form("Survey");
    let first = sample_record(&form);
    let second = sample_record(&form);

    // Act
    log.record(&first).unwrap();
    log.record(&second).unwrap();

    // Assert
    let records = log.list(None).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, first.id);
    assert_eq!(records[1].id, second.id);
}

#[rstest]
fn given_records_for_two_forms_when_listing_by_form_then_filtered(
    log: (TempDir, JsonSubmissionLog),
) {
    let (_temp, log) = log;
    let survey = titled_form("Survey");
    let poll = titled_form("Poll");
    log.record(&sample_record(&survey)).unwrap();
    log.record(&sample_record(&poll)).unwrap();
    log.record(&sample_record(&survey)).unwrap();

    let filtered = log.list(Some(&survey.id)).unwrap();

    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|r| r.form_id == survey.id));
}

#[rstest]
fn given_missing_log_file_when_listing_then_empty_vec(log: (TempDir, JsonSubmissionLog)) {
    let (_temp, log) = log;
    assert!(log.list(None).unwrap().is_empty());
}
