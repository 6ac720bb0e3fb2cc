//! Application services
//!
//! Concrete service implementations that orchestrate domain dispatch.

mod demo;

pub use demo::{reference_sequence, Binding, DemoReport, DemoService, Step};
