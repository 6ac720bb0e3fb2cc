//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::TypeTag;

/// Domain errors represent violations of the type hierarchy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("cannot narrow {from} to {to}: instance is not a {to}")]
    InvalidDowncast { from: TypeTag, to: TypeTag },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
