//! Method overriding and dynamic dispatch between a `Parent` and a `Child` type.
//!
//! - [`domain`]: the hierarchy, dispatch on the dynamic type, narrowing
//! - [`application`]: statically typed references and the demonstration run
//! - [`config`]: layered settings
//! - [`cli`]: argument parsing and command dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
