//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::{FormService, SubmissionService};
use crate::config::Settings;
use crate::infrastructure::traits::{
    FormStore, JsonFormStore, JsonSubmissionLog, SubmissionSink,
};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Form persistence abstraction
    pub store: Arc<dyn FormStore>,

    /// Submission recorder abstraction
    pub sink: Arc<dyn SubmissionSink>,

    /// Form save/load/interchange service
    pub forms: FormService,

    /// Submission recording service
    pub submissions: SubmissionService,
}

impl ServiceContainer {
    /// Create a new service container with the JSON-file implementations
    /// rooted at the configured storage directory.
    pub fn new(settings: Settings) -> Self {
        let store = Arc::new(JsonFormStore::new(settings.storage_dir.clone()));
        let sink = Arc::new(JsonSubmissionLog::in_dir(&settings.storage_dir));
        Self::with_deps(settings, store, sink)
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        store: Arc<dyn FormStore>,
        sink: Arc<dyn SubmissionSink>,
    ) -> Self {
        let settings = Arc::new(settings);
        let forms = FormService::new(store.clone());
        let submissions = SubmissionService::new(sink.clone());

        Self {
            settings,
            store,
            sink,
            forms,
            submissions,
        }
    }
}
