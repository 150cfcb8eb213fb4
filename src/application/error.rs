//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("invalid command '{line}': {message}")]
    InvalidCommand { line: String, message: String },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    pub(crate) fn invalid_command(line: &str, message: impl Into<String>) -> Self {
        Self::InvalidCommand {
            line: line.trim().to_string(),
            message: message.into(),
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
