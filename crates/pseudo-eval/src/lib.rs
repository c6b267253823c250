//! Pseudocode interpreter and test runner.
//!
//! The [`Interpreter`] owns the context (functions and the variable scope
//! stack). The [`TestFramework`] resets it, loads an implementation, runs
//! every case of a test script against it and keeps the resulting suites.
//! [`TddSession`] layers the red/green/refactor cycle on top.

mod config;
mod env;
mod error;
mod interpreter;
mod session;
mod store;
mod test_runner;

pub use config::{AssertionMode, RunnerConfig};
pub use env::Environment;
pub use error::{EvalError, EvalResult};
pub use interpreter::Interpreter;
pub use session::{HistoryEntry, TddSession, SESSION_SUITE_NAME};
pub use store::SuiteStore;
pub use test_runner::{CaseError, TestFramework};

pub use pseudo_types::{determine_status, TestCase, TestStatus, TestSuite, Value};
