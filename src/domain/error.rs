//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the forest model itself.
/// These are independent of where the data came from.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("line {line}: invalid species '{token}'")]
    InvalidSpecies { line: usize, token: String },

    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },

    #[error("tree number {index} does not exist (forest has {len} trees)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
