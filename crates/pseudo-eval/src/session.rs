//! Red/green/refactor session on top of the test runner.
//!
//! Holds the learner's current implementation and test script, the status
//! of the last run and a history of status changes. Rendering the status
//! and persisting the history are left to the caller.

use crate::config::RunnerConfig;
use crate::test_runner::TestFramework;
use pseudo_types::{TestStatus, TestSuite};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

/// Suite name used for every session run.
pub const SESSION_SUITE_NAME: &str = "Current Exercise";

/// One status change in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position in the session, starting at 0.
    pub sequence: u64,
    pub status: TestStatus,
    /// Snapshot of the run; absent for the move into refactor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<TestSuite>,
    /// Hex SHA-256 of the implementation text at this point.
    pub implementation_digest: String,
}

#[derive(Debug, Clone, Default)]
pub struct TddSession {
    framework: TestFramework,
    implementation: String,
    test_code: String,
    current_suite: Option<TestSuite>,
    status: TestStatus,
    history: Vec<HistoryEntry>,
    next_sequence: u64,
}

impl TddSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self {
            framework: TestFramework::with_config(config),
            ..Self::default()
        }
    }

    pub fn set_implementation(&mut self, code: impl Into<String>) {
        self.implementation = code.into();
    }

    pub fn set_test_code(&mut self, code: impl Into<String>) {
        self.test_code = code.into();
    }

    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    pub fn test_code(&self) -> &str {
        &self.test_code
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn current_suite(&self) -> Option<&TestSuite> {
        self.current_suite.as_ref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn framework(&self) -> &TestFramework {
        &self.framework
    }

    /// Both the implementation and the tests contain something.
    pub fn can_run_tests(&self) -> bool {
        !self.implementation.trim().is_empty() && !self.test_code.trim().is_empty()
    }

    /// Run the tests and record the outcome. Returns `None` without doing
    /// anything when [`can_run_tests`](Self::can_run_tests) is false.
    pub fn run_tests(&mut self) -> Option<&TestSuite> {
        if !self.can_run_tests() {
            return None;
        }

        let suite = self
            .framework
            .run_tests(&self.implementation, &self.test_code, SESSION_SUITE_NAME);
        self.status = self.framework.determine_status(&suite);
        self.record(Some(suite.clone()));
        self.current_suite = Some(suite);
        self.current_suite.as_ref()
    }

    /// Enter refactor after a green run. Returns whether the move happened.
    pub fn move_to_refactor(&mut self) -> bool {
        if self.status != TestStatus::Green {
            return false;
        }
        self.status = TestStatus::Refactor;
        self.record(None);
        true
    }

    /// Leave refactor by re-running the tests. Does nothing outside refactor.
    pub fn complete_refactor(&mut self) -> Option<&TestSuite> {
        if self.status != TestStatus::Refactor {
            return None;
        }
        self.run_tests()
    }

    /// Clear the code, the status and the history.
    pub fn reset(&mut self) {
        self.implementation.clear();
        self.test_code.clear();
        self.current_suite = None;
        self.status = TestStatus::Idle;
        self.history.clear();
        self.next_sequence = 0;
    }

    fn record(&mut self, suite: Option<TestSuite>) {
        let entry = HistoryEntry {
            sequence: self.next_sequence,
            status: self.status,
            suite,
            implementation_digest: digest_hex(&self.implementation),
        };
        debug!(sequence = entry.sequence, status = %entry.status, "session status change");
        self.next_sequence += 1;
        self.history.push(entry);
    }
}

fn digest_hex(text: &str) -> String {
    Sha256::digest(text.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
