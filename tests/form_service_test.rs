//! Tests for the form service: persistence, interchange and share links

use std::sync::Arc;

use tempfile::TempDir;

use formforge::application::services::FormService;
use formforge::application::ApplicationError;
use formforge::domain::{FieldPatch, FieldSeed, FieldType, Form, FormPatch, ValidationRules};
use formforge::infrastructure::traits::{JsonFormStore, MemoryFormStore};

fn memory_service() -> FormService {
    FormService::new(Arc::new(MemoryFormStore::default()))
}

fn rich_form() -> Form {
    let mut form = Form::new();
    form.update(FormPatch {
        title: Some("Conference signup".to_string()),
        description: Some("Annual event".to_string()),
        ..Default::default()
    });
    let email = form.add_field(FieldSeed {
        field_type: Some(FieldType::Email),
        required: true,
        ..Default::default()
    });
    form.add_field(FieldSeed::of_type(FieldType::Select));
    form.update_field(
        &email,
        FieldPatch {
            validation: Some(ValidationRules {
                min_length: Some(5),
                ..Default::default()
            }),
            ..Default::default()
        },
    );
    form.set_multi_step(true);
    form.add_step("Preferences", Some("Pick your sessions".to_string()));
    form
}

#[test]
fn given_saved_form_when_loading_then_identical() {
    let svc = memory_service();
    let form = rich_form();

    let id = svc.save(&form).unwrap();
    let loaded = svc.load(&id).unwrap();

    assert_eq!(loaded, form);
}

#[test]
fn given_unknown_id_when_loading_then_not_found_error() {
    let svc = memory_service();
    let result = svc.load("missing");
    assert!(matches!(result, Err(ApplicationError::FormNotFound(id)) if id == "missing"));
}

#[test]
fn given_unknown_id_when_deleting_then_not_found_error() {
    let svc = memory_service();
    assert!(matches!(
        svc.delete("missing"),
        Err(ApplicationError::FormNotFound(_))
    ));
}

#[test]
fn given_form_when_exporting_and_importing_then_structurally_equal() {
    // The exported document is the single interchange format: importing it
    // back must reproduce the form exactly, steps and rules included.
    let svc = memory_service();
    let form = rich_form();

    let json = svc.export_json(&form).unwrap();
    let imported = svc.import_json(&json).unwrap();

    assert_eq!(imported, form);
}

#[test]
fn given_document_with_unknown_field_type_when_importing_then_rejected() {
    let svc = memory_service();
    let json = r#"{
        "id": "f1",
        "title": "Broken",
        "fields": [{"id": "x", "type": "hologram", "label": "?"}]
    }"#;

    let result = svc.import_json(json);

    assert!(matches!(result, Err(ApplicationError::MalformedForm { .. })));
}

#[test]
fn given_malformed_import_when_rejected_then_stored_forms_untouched() {
    // Arrange: one good form on disk
    let temp = TempDir::new().unwrap();
    let svc = FormService::new(Arc::new(JsonFormStore::new(temp.path())));
    let form = rich_form();
    svc.save(&form).unwrap();

    // Act: import fails, nothing gets saved
    assert!(svc.import_json("{broken").is_err());

    // Assert
    let summaries = svc.list().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(svc.load(&form.id).unwrap(), form);
}

#[test]
fn given_exported_file_when_importing_from_disk_then_round_trips() {
    // Arrange
    let temp = TempDir::new().unwrap();
    let svc = memory_service();
    let form = rich_form();
    let path = temp.path().join("form.json");

    // Act
    svc.export_file(&form, &path).unwrap();
    let imported = svc.import_file(&path).unwrap();

    // Assert
    assert_eq!(imported, form);
}

#[test]
fn given_missing_file_when_importing_then_operation_failed_with_path() {
    let svc = memory_service();
    let result = svc.import_file(std::path::Path::new("/nonexistent/form.json"));
    assert!(matches!(
        result,
        Err(ApplicationError::OperationFailed { .. })
    ));
}

#[test]
fn given_form_id_when_deriving_share_link_then_origin_form_id_shape() {
    let svc = memory_service();
    assert_eq!(
        svc.share_link("https://formforge.app", "abc-123"),
        "https://formforge.app/form/abc-123"
    );
}

#[test]
fn given_defaulted_optional_attributes_when_exporting_then_document_omits_them() {
    let svc = memory_service();
    let form = Form::new();

    let json = svc.export_json(&form).unwrap();

    assert!(!json.contains("description"));
    assert!(!json.contains("redirect_url"));
}
