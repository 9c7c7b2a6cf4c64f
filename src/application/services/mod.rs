//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FormStore, SubmissionSink)
//! but are themselves concrete structs, not traits.

mod form_service;
mod submission_service;

pub use form_service::FormService;
pub use submission_service::{FillOutcome, SubmissionService};
