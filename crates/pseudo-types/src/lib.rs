//! Shared types for the pseudocode TDD core.
//!
//! This crate defines the runtime [`Value`], the statement model produced by
//! the parser, and the test-result types (`TestCase`, `TestSuite`,
//! `TestStatus`) handed to the UI layer. It carries no behavior beyond
//! formatting and serde.

mod suite;
mod value;
pub mod ast;
pub mod reference;

pub use suite::{determine_status, FailureKind, TestCase, TestStatus, TestSuite};
pub use value::Value;
