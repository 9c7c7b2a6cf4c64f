//! Application-level errors

use thiserror::Error;

/// Application errors carry the context services add on top of raw
/// I/O and parse failures.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("form not found: {0}")]
    FormNotFound(String),

    #[error("malformed form document: {message}")]
    MalformedForm { message: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
