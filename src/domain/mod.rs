//! Domain layer: the two-type hierarchy and its dispatch rules
//!
//! This layer is independent of external concerns (no config, no CLI). The only
//! I/O it touches is the `Write` sink an operation emits its line to.

pub mod entities;
pub mod error;

pub use entities::*;
pub use error::{DomainError, DomainResult};
