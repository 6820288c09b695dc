//! Command-line front end for `lineage-solver`.
//!
//! Loads a class hierarchy from a JSON file and answers path and
//! type-variable queries against it.

pub mod args;
pub mod driver;
pub mod hierarchy;
pub mod output;
pub mod tracing_config;
pub mod type_syntax;

#[cfg(test)]
#[path = "tests/type_syntax_tests.rs"]
mod type_syntax_tests;

#[cfg(test)]
#[path = "tests/hierarchy_tests.rs"]
mod hierarchy_tests;

#[cfg(test)]
#[path = "tests/driver_tests.rs"]
mod driver_tests;
