//! Application layer: references, operations and the demonstration service
//!
//! This layer orchestrates domain dispatch and owns the output sink.

pub mod error;
pub mod error_ext;
pub mod reference;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use reference::{Operation, Reference};
