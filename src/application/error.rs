//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add I/O and format context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{context}")]
    ResourceUnavailable {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot format mismatch in {}: {message}", path.display())]
    FormatMismatch { path: PathBuf, message: String },

    #[error("invalid forest name '{name}': {reason}")]
    InvalidForestName { name: String, reason: &'static str },

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
