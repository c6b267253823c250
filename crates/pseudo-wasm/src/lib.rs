//! Pseudocode test runner as a WASM module for the browser workbench.
//!
//! This crate exposes the test runner via `wasm-bindgen`. Every result
//! crosses the boundary as a JSON string so the UI can `JSON.parse` it
//! into the same shapes the runner serializes.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { Workbench } from 'pseudo-wasm';
//!
//! await init();
//!
//! const bench = new Workbench(false);
//! const suite = JSON.parse(bench.run_tests(code, tests, "Current Exercise"));
//! console.log(bench.determine_status(JSON.stringify(suite)));
//! // "green"
//! ```

use pseudo_eval::{AssertionMode, RunnerConfig, TestFramework, TestSuite};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// A test runner plus the suites it has produced.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct Workbench {
    framework: TestFramework,
}

#[wasm_bindgen]
impl Workbench {
    /// Create a workbench. With `all_assertions` every assertion line of a
    /// test is checked instead of only the first.
    #[wasm_bindgen(constructor)]
    pub fn new(all_assertions: bool) -> Workbench {
        let mode = if all_assertions {
            AssertionMode::All
        } else {
            AssertionMode::FirstOnly
        };
        let config = RunnerConfig::default().with_assertion_mode(mode);
        Workbench {
            framework: TestFramework::with_config(config),
        }
    }

    /// Run `tests` against `implementation` and store the suite under
    /// `suite_name`.
    ///
    /// Returns a JSON `TestSuite`:
    /// ```json
    /// {
    ///   "name": "Current Exercise",
    ///   "tests": [{ "name": "\"adds\"", "code": "...", "passed": true, "actual": 5, "expected": 5 }],
    ///   "passed": 1, "failed": 0, "total": 1
    /// }
    /// ```
    pub fn run_tests(&mut self, implementation: &str, tests: &str, suite_name: &str) -> String {
        let suite = self.framework.run_tests(implementation, tests, suite_name);
        to_json(&suite)
    }

    /// Classify a JSON `TestSuite` as `"idle"`, `"red"` or `"green"`.
    ///
    /// Returns the status as a JSON string, or an `{"error": ...}` object
    /// when the suite cannot be read.
    pub fn determine_status(&self, suite_json: &str) -> String {
        match serde_json::from_str::<TestSuite>(suite_json) {
            Ok(suite) => to_json(&self.framework.determine_status(&suite)),
            Err(e) => error_json(&format!("Invalid test suite: {e}")),
        }
    }

    /// The stored suite of that name, or `null`.
    pub fn get_test_suite(&self, name: &str) -> String {
        to_json(&self.framework.get_test_suite(name))
    }

    /// Every stored suite, in the order first stored.
    pub fn get_all_test_suites(&self) -> String {
        to_json(self.framework.get_all_test_suites())
    }

    pub fn clear_test_suites(&mut self) {
        self.framework.clear_test_suites();
    }
}

/// Return the language reference shown next to the editor.
#[wasm_bindgen]
pub fn get_reference() -> String {
    pseudo_types::reference::generate_reference()
}

/// Return the runner version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| error_json(&format!("Serialization error: {e}")))
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}
