//! Form persistence and interchange service
//!
//! Orchestrates the domain model against the FormStore trait: save/load,
//! listing, JSON import/export and share-link derivation. The storage
//! medium stays opaque to this layer.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::error_ext::IoResultExt;
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::Form;
use crate::infrastructure::traits::{FormStore, FormSummary};

/// Service for saving, loading and exchanging forms.
pub struct FormService {
    store: Arc<dyn FormStore>,
}

impl FormService {
    pub fn new(store: Arc<dyn FormStore>) -> Self {
        Self { store }
    }

    /// Persist a form, overwriting any prior version. Returns the id.
    pub fn save(&self, form: &Form) -> ApplicationResult<String> {
        debug!("save: form={}", form.id);
        self.store
            .save(form)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("save form {}", form.id),
                source: Box::new(e),
            })
    }

    /// Load a form by id; a missing id is a distinct, non-retryable error.
    pub fn load(&self, form_id: &str) -> ApplicationResult<Form> {
        debug!("load: form={}", form_id);
        self.store
            .load_by_id(form_id)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("load form {}", form_id),
                source: Box::new(e),
            })?
            .ok_or_else(|| ApplicationError::FormNotFound(form_id.to_string()))
    }

    /// Summaries of all saved forms.
    pub fn list(&self) -> ApplicationResult<Vec<FormSummary>> {
        self.store
            .list_all()
            .map_err(|e| ApplicationError::OperationFailed {
                context: "list forms".to_string(),
                source: Box::new(e),
            })
    }

    /// Delete a saved form. Missing ids are reported as not-found.
    pub fn delete(&self, form_id: &str) -> ApplicationResult<()> {
        debug!("delete: form={}", form_id);
        let removed = self
            .store
            .delete(form_id)
            .map_err(|e| ApplicationError::OperationFailed {
                context: format!("delete form {}", form_id),
                source: Box::new(e),
            })?;
        if removed {
            Ok(())
        } else {
            Err(ApplicationError::FormNotFound(form_id.to_string()))
        }
    }

    /// Serialize a form to its interchange JSON document.
    pub fn export_json(&self, form: &Form) -> ApplicationResult<String> {
        serde_json::to_string_pretty(form).map_err(|e| ApplicationError::OperationFailed {
            context: format!("serialize form {}", form.id),
            source: Box::new(e),
        })
    }

    /// Parse an interchange JSON document into a form.
    ///
    /// All-or-nothing: a parse failure or shape mismatch rejects the whole
    /// document, so whatever form the caller currently holds stays intact.
    pub fn import_json(&self, json: &str) -> ApplicationResult<Form> {
        serde_json::from_str(json).map_err(|e| ApplicationError::MalformedForm {
            message: e.to_string(),
        })
    }

    /// Read and import a form document from a file.
    pub fn import_file(&self, path: &Path) -> ApplicationResult<Form> {
        debug!("import_file: {}", path.display());
        let json = std::fs::read_to_string(path).with_path_context("read form document", path)?;
        self.import_json(&json)
    }

    /// Export a form document to a file.
    pub fn export_file(&self, form: &Form, path: &Path) -> ApplicationResult<()> {
        debug!("export_file: form={} -> {}", form.id, path.display());
        let json = self.export_json(form)?;
        std::fs::write(path, json).with_path_context("write form document", path)
    }

    /// Derive the public fill URL for a form. Purely computed; implies no
    /// server contract.
    pub fn share_link(&self, origin: &str, form_id: &str) -> String {
        format!("{}/form/{}", origin.trim_end_matches('/'), form_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::MemoryFormStore;

    fn service() -> FormService {
        FormService::new(Arc::new(MemoryFormStore::default()))
    }

    #[test]
    fn given_origin_with_trailing_slash_when_deriving_link_then_no_double_slash() {
        let svc = service();
        assert_eq!(
            svc.share_link("https://forms.example/", "abc"),
            "https://forms.example/form/abc"
        );
    }

    #[test]
    fn given_document_missing_keys_when_importing_then_malformed_error() {
        let svc = service();
        let result = svc.import_json(r#"{"title": "no id or fields"}"#);
        assert!(matches!(
            result,
            Err(ApplicationError::MalformedForm { .. })
        ));
    }

    #[test]
    fn given_garbage_when_importing_then_malformed_error() {
        let svc = service();
        assert!(svc.import_json("{not json").is_err());
    }
}
