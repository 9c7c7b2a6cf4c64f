//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod field;
pub mod form;
pub mod session;
pub mod validation;

pub use field::{Field, FieldSeed, FieldType, FieldValue, ValidationRules};
pub use form::{Form, FormPatch, FormSettings, FormStep, FieldPatch, Mutation};
pub use session::{Advance, BuilderSession, FillSession, SubmissionData};
pub use validation::{validate, validate_step, Rule, ValidationFailure};
