//! Configuration loading and schema definitions
//!
//! Configuration is optional: it is only read from a file passed explicitly on
//! the command line, and command-line flags take precedence over it.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;
