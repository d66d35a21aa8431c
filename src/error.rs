//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.

use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// A command that needs an id was issued without one.
    #[error("Missing the id parameter.")]
    MissingArgument,

    /// The id argument does not start with an integer.
    #[error("The value of the id parameter is not valid: '{0}'.")]
    InvalidArgument(String),

    /// The id is well formed but no quiz carries it.
    #[error("There is no quiz with id={0}.")]
    NotFound(i64),

    /// One or more field constraints were violated. Carries one message per field.
    #[error("The quiz is not valid: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Error originating from the persistence layer (`sqlx`).
    #[error("Store Error: {0}")]
    Store(Arc<sqlx::Error>),

    /// The first token of the line is not a known command.
    #[error("Unknown command: '{0}'. Use 'help' to see all available commands.")]
    UnknownCommand(String),

    /// Error raised while waiting on the input front end (e.g. a panicked blocking task).
    #[error("Prompt Error: {0}")]
    Prompt(String),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    /// Invalid startup configuration.
    #[error("Configuration Error: {0}")]
    Config(String),
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Store(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Prompt(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = AppError::Validation(vec![
            "question must not be empty".to_string(),
            "answer must not be empty".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "The quiz is not valid: question must not be empty; answer must not be empty"
        );
    }

    #[test]
    fn test_not_found_names_the_id() {
        assert_eq!(
            AppError::NotFound(42).to_string(),
            "There is no quiz with id=42."
        );
    }

    #[test]
    fn test_io_error_is_wrapped() {
        let err: AppError = std::io::Error::new(std::io::ErrorKind::Other, "boom").into();
        assert!(matches!(err, AppError::Io(_)));
        assert!(err.to_string().contains("boom"));
    }
}
