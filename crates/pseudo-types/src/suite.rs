use crate::Value;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Why a test case failed. Lets the view layer branch on the failure
/// without parsing the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Actual and expected values differ.
    Mismatch,
    FunctionNotFound,
    InvalidAssertSyntax,
    InvalidExpectSyntax,
    InvalidFunctionCall,
    UnparsableLiteral,
    NoAssertions,
}

/// A single named test scenario from a test script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    /// Text after `TEST `, trimmed, quotes included.
    pub name: String,
    /// The lines between `TEST` and `END`, joined with `\n`.
    pub code: String,
    /// `None` until the case has been executed.
    pub passed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureKind>,
    /// An absent field is `None`; a present `null` is `Some(Value::Null)`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub actual: Option<Value>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present_value"
    )]
    pub expected: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl TestCase {
    /// Create a case that has not run yet.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            passed: None,
            error: None,
            failure: None,
            actual: None,
            expected: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.passed.is_none()
    }

    /// Mark the case failed with the given kind and message.
    pub fn fail(mut self, kind: FailureKind, message: impl Into<String>) -> Self {
        self.passed = Some(false);
        self.failure = Some(kind);
        self.error = Some(message.into());
        self
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.passed {
            Some(true) => write!(f, "  ✓ {}", self.name),
            Some(false) => write!(
                f,
                "  ✗ {} — {}",
                self.name,
                self.error.as_deref().unwrap_or("unknown error")
            ),
            None => write!(f, "  · {}", self.name),
        }
    }
}

/// An aggregated run of test cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
    #[serde(rename = "passed")]
    pub passed_count: usize,
    #[serde(rename = "failed")]
    pub failed_count: usize,
    pub total: usize,
}

impl TestSuite {
    /// Build a suite and derive its counts from the cases.
    pub fn from_cases(name: impl Into<String>, tests: Vec<TestCase>) -> Self {
        let passed_count = tests.iter().filter(|t| t.passed == Some(true)).count();
        let failed_count = tests.iter().filter(|t| t.passed == Some(false)).count();
        let total = tests.len();
        Self {
            name: name.into(),
            tests,
            passed_count,
            failed_count,
            total,
        }
    }

    pub fn status(&self) -> TestStatus {
        determine_status(self)
    }
}

impl fmt::Display for TestSuite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for t in &self.tests {
            writeln!(f, "{t}")?;
        }
        write!(
            f,
            "\n{} passed, {} failed, {} total",
            self.passed_count, self.failed_count, self.total
        )
    }
}

/// Position of a suite in the red/green/refactor cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    #[default]
    Idle,
    Red,
    Green,
    Refactor,
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Red => write!(f, "red"),
            Self::Green => write!(f, "green"),
            Self::Refactor => write!(f, "refactor"),
        }
    }
}

/// Classify a suite snapshot.
///
/// Never returns [`TestStatus::Refactor`]; that state is entered by the
/// caller after a green run.
pub fn determine_status(suite: &TestSuite) -> TestStatus {
    if suite.total == 0 {
        return TestStatus::Idle;
    }
    if suite.failed_count > 0 {
        return TestStatus::Red;
    }
    if suite.passed_count == suite.total {
        return TestStatus::Green;
    }
    TestStatus::Idle
}
