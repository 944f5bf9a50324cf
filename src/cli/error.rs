//! CLI-level errors (wraps application errors)

use std::io::ErrorKind;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(DomainError::IndexOutOfRange { .. }) => {
                    crate::exitcode::USAGE
                }
                ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                ApplicationError::FormatMismatch { .. } => crate::exitcode::DATAERR,
                ApplicationError::ResourceUnavailable { context, source } => {
                    match source.kind() {
                        ErrorKind::NotFound if context.starts_with("read") => {
                            crate::exitcode::NOINPUT
                        }
                        _ if context.starts_with("write") => crate::exitcode::CANTCREAT,
                        _ => crate::exitcode::IOERR,
                    }
                }
                ApplicationError::InvalidForestName { .. } => crate::exitcode::USAGE,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    fn resource(context: &str, kind: ErrorKind) -> CliError {
        CliError::Application(ApplicationError::ResourceUnavailable {
            context: context.to_string(),
            source: io::Error::new(kind, "boom"),
        })
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            CliError::InvalidArgs("x".into()).exit_code(),
            crate::exitcode::USAGE
        );
        assert_eq!(
            CliError::from(DomainError::InvalidSpecies {
                line: 1,
                token: "Oak".into()
            })
            .exit_code(),
            crate::exitcode::DATAERR
        );
        assert_eq!(
            CliError::from(DomainError::IndexOutOfRange { index: 9, len: 1 }).exit_code(),
            crate::exitcode::USAGE
        );
        assert_eq!(
            CliError::Application(ApplicationError::FormatMismatch {
                path: PathBuf::from("a.db"),
                message: "bad".into()
            })
            .exit_code(),
            crate::exitcode::DATAERR
        );
        assert_eq!(
            CliError::Application(ApplicationError::InvalidForestName {
                name: "../up".into(),
                reason: "name contains a path separator"
            })
            .exit_code(),
            crate::exitcode::USAGE
        );
        assert_eq!(
            resource("read snapshot: a.db", ErrorKind::NotFound).exit_code(),
            crate::exitcode::NOINPUT
        );
        assert_eq!(
            resource("write snapshot: a.db", ErrorKind::PermissionDenied).exit_code(),
            crate::exitcode::CANTCREAT
        );
        assert_eq!(
            resource("read snapshot: a.db", ErrorKind::PermissionDenied).exit_code(),
            crate::exitcode::IOERR
        );
    }
}
