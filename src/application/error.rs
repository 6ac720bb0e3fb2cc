//! Application-level errors (wraps domain errors)

use thiserror::Error;

use crate::application::Operation;
use crate::domain::{DomainError, TypeTag};

/// Application errors wrap domain errors and add application-level context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{operation} is not defined on a {declared} reference")]
    OperationNotVisible {
        operation: Operation,
        declared: TypeTag,
    },

    #[error("step {step}: expected {expected:?}, got {actual:?}")]
    UnexpectedOutput {
        step: String,
        expected: String,
        actual: String,
    },

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
