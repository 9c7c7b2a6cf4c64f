//! Persistence boundary traits for testability
//!
//! These traits abstract where forms and submissions live, allowing
//! services to be tested with in-memory implementations. The real
//! implementations keep one JSON document per form under a storage
//! directory, plus an append-only submission log.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{FieldValue, Form};

/// Lightweight listing entry for a saved form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSummary {
    pub id: String,
    pub title: String,
    pub field_count: usize,
    pub is_multi_step: bool,
}

impl FormSummary {
    pub fn of(form: &Form) -> Self {
        Self {
            id: form.id.clone(),
            title: form.title.clone(),
            field_count: form.fields.len(),
            is_multi_step: form.is_multi_step,
        }
    }
}

/// One recorded fill attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub id: String,
    pub form_id: String,
    pub title: String,
    pub data: BTreeMap<String, FieldValue>,
    pub submitted_at: DateTime<Utc>,
}

/// Form persistence abstraction.
pub trait FormStore: Send + Sync {
    /// Persist a form under its id, overwriting any prior version.
    fn save(&self, form: &Form) -> io::Result<String>;

    /// Load a form; `None` if the id is unknown.
    fn load_by_id(&self, form_id: &str) -> io::Result<Option<Form>>;

    /// Summaries of every stored form.
    fn list_all(&self) -> io::Result<Vec<FormSummary>>;

    /// Remove a stored form; `false` if the id was unknown.
    fn delete(&self, form_id: &str) -> io::Result<bool>;
}

/// Append-only submission recorder.
pub trait SubmissionSink: Send + Sync {
    /// Append one record.
    fn record(&self, record: &SubmissionRecord) -> io::Result<()>;

    /// All records, optionally narrowed to one form.
    fn list(&self, form_id: Option<&str>) -> io::Result<Vec<SubmissionRecord>>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

fn data_err(e: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e.to_string())
}

/// Form store keeping `<storage_dir>/<form-id>.json` documents.
#[derive(Debug)]
pub struct JsonFormStore {
    dir: PathBuf,
}

impl JsonFormStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn form_path(&self, form_id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", form_id))
    }
}

impl FormStore for JsonFormStore {
    fn save(&self, form: &Form) -> io::Result<String> {
        std::fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(form).map_err(data_err)?;
        std::fs::write(self.form_path(&form.id), json)?;
        Ok(form.id.clone())
    }

    fn load_by_id(&self, form_id: &str) -> io::Result<Option<Form>> {
        let path = self.form_path(form_id);
        let json = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        let form = serde_json::from_str(&json).map_err(data_err)?;
        Ok(Some(form))
    }

    fn list_all(&self) -> io::Result<Vec<FormSummary>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut summaries = Vec::new();
        for entry in walkdir::WalkDir::new(&self.dir)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().map(|ext| ext == "json").unwrap_or(false) {
                // Skip documents that are not forms (e.g. the submission log)
                let content = match std::fs::read_to_string(path) {
                    Ok(c) => c,
                    Err(_) => continue,
                };
                if let Ok(form) = serde_json::from_str::<Form>(&content) {
                    summaries.push(FormSummary::of(&form));
                }
            }
        }
        summaries.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        Ok(summaries)
    }

    fn delete(&self, form_id: &str) -> io::Result<bool> {
        match std::fs::remove_file(self.form_path(form_id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Submission log appending to a single `submissions.json` file.
#[derive(Debug)]
pub struct JsonSubmissionLog {
    path: PathBuf,
}

impl JsonSubmissionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional log location inside a storage directory.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("submissions.json"))
    }

    fn read_all(&self) -> io::Result<Vec<SubmissionRecord>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };
        serde_json::from_str(&json).map_err(data_err)
    }
}

impl SubmissionSink for JsonSubmissionLog {
    fn record(&self, record: &SubmissionRecord) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut records = self.read_all()?;
        records.push(record.clone());
        let json = serde_json::to_string_pretty(&records).map_err(data_err)?;
        std::fs::write(&self.path, json)
    }

    fn list(&self, form_id: Option<&str>) -> io::Result<Vec<SubmissionRecord>> {
        let records = self.read_all()?;
        Ok(match form_id {
            Some(id) => records.into_iter().filter(|r| r.form_id == id).collect(),
            None => records,
        })
    }
}

// ============================================================
// IN-MEMORY IMPLEMENTATIONS (tests, ephemeral sessions)
// ============================================================

/// Form store backed by a map; useful in tests.
#[derive(Debug, Default)]
pub struct MemoryFormStore {
    forms: Mutex<BTreeMap<String, Form>>,
}

impl FormStore for MemoryFormStore {
    fn save(&self, form: &Form) -> io::Result<String> {
        self.forms
            .lock()
            .expect("form store lock")
            .insert(form.id.clone(), form.clone());
        Ok(form.id.clone())
    }

    fn load_by_id(&self, form_id: &str) -> io::Result<Option<Form>> {
        Ok(self
            .forms
            .lock()
            .expect("form store lock")
            .get(form_id)
            .cloned())
    }

    fn list_all(&self) -> io::Result<Vec<FormSummary>> {
        Ok(self
            .forms
            .lock()
            .expect("form store lock")
            .values()
            .map(FormSummary::of)
            .collect())
    }

    fn delete(&self, form_id: &str) -> io::Result<bool> {
        Ok(self
            .forms
            .lock()
            .expect("form store lock")
            .remove(form_id)
            .is_some())
    }
}

/// Submission sink collecting records in memory; useful in tests.
#[derive(Debug, Default)]
pub struct MemorySubmissionSink {
    records: Mutex<Vec<SubmissionRecord>>,
}

impl SubmissionSink for MemorySubmissionSink {
    fn record(&self, record: &SubmissionRecord) -> io::Result<()> {
        self.records
            .lock()
            .expect("sink lock")
            .push(record.clone());
        Ok(())
    }

    fn list(&self, form_id: Option<&str>) -> io::Result<Vec<SubmissionRecord>> {
        let records = self.records.lock().expect("sink lock");
        Ok(match form_id {
            Some(id) => records.iter().filter(|r| r.form_id == id).cloned().collect(),
            None => records.clone(),
        })
    }
}
