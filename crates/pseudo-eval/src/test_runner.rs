//! Test runner: executes test scripts against a loaded implementation.
//!
//! Each run resets the interpreter, loads the implementation, parses the
//! script into cases and runs every case independently. A case that cannot
//! be evaluated is recorded as failed; it never stops the remaining cases.

use crate::config::{AssertionMode, RunnerConfig};
use crate::error::EvalError;
use crate::interpreter::Interpreter;
use crate::store::SuiteStore;
use pseudo_parser::{
    assertion_lines, parse_assertion_line, parse_call, parse_literal, ParseError,
};
use pseudo_types::ast::AssertionStyle;
use pseudo_types::{determine_status, FailureKind, TestCase, TestStatus, TestSuite, Value};
use thiserror::Error;
use tracing::{debug, trace};

/// Why a single test case failed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaseError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error("No assertions found in test")]
    NoAssertions,

    #[error("Expected {expected}, but got {actual}")]
    Mismatch { expected: Value, actual: Value },
}

impl CaseError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Parse(e) => e.kind(),
            Self::Eval(e) => e.kind(),
            Self::NoAssertions => FailureKind::NoAssertions,
            Self::Mismatch { .. } => FailureKind::Mismatch,
        }
    }
}

/// The evaluated sides of one assertion line.
struct Checked {
    actual: Value,
    expected: Value,
}

impl Checked {
    fn passed(&self) -> bool {
        self.actual == self.expected
    }

    fn mismatch(&self) -> CaseError {
        CaseError::Mismatch {
            expected: self.expected.clone(),
            actual: self.actual.clone(),
        }
    }
}

/// Runs test scripts and keeps the resulting suites.
#[derive(Debug, Clone, Default)]
pub struct TestFramework {
    interpreter: Interpreter,
    suites: SuiteStore,
    config: RunnerConfig,
}

impl TestFramework {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RunnerConfig) -> Self {
        Self::with_interpreter(Interpreter::new(), config)
    }

    /// Build a runner around an existing interpreter context.
    pub fn with_interpreter(interpreter: Interpreter, config: RunnerConfig) -> Self {
        Self {
            interpreter,
            suites: SuiteStore::new(),
            config,
        }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// The interpreter as left by the last run.
    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    /// Parse a test script into pending cases.
    pub fn parse_test_code(&self, script: &str) -> Vec<TestCase> {
        pseudo_parser::parse_test_script(script)
    }

    /// Run `test_script` against `implementation` and store the suite under
    /// `suite_name`, replacing any earlier suite of that name.
    pub fn run_tests(
        &mut self,
        implementation: &str,
        test_script: &str,
        suite_name: &str,
    ) -> TestSuite {
        self.interpreter.reset();
        self.interpreter.load_code(implementation);

        let results: Vec<TestCase> = self
            .parse_test_code(test_script)
            .into_iter()
            .map(|case| self.run_case(case))
            .collect();

        let suite = TestSuite::from_cases(suite_name, results);
        debug!(
            suite = %suite.name,
            passed = suite.passed_count,
            failed = suite.failed_count,
            total = suite.total,
            "suite finished"
        );
        self.suites.insert(suite.clone());
        suite
    }

    /// [`run_tests`](Self::run_tests) under the configured default name.
    pub fn run_tests_default(&mut self, implementation: &str, test_script: &str) -> TestSuite {
        let name = self.config.default_suite_name.clone();
        self.run_tests(implementation, test_script, &name)
    }

    pub fn determine_status(&self, suite: &TestSuite) -> TestStatus {
        determine_status(suite)
    }

    pub fn get_test_suite(&self, name: &str) -> Option<&TestSuite> {
        self.suites.get(name)
    }

    pub fn get_all_test_suites(&self) -> &[TestSuite] {
        self.suites.all()
    }

    pub fn remove_test_suite(&mut self, name: &str) -> Option<TestSuite> {
        self.suites.remove(name)
    }

    pub fn clear_test_suites(&mut self) {
        self.suites.clear();
    }

    /// Execute one case against the loaded implementation.
    pub fn run_case(&mut self, case: TestCase) -> TestCase {
        let lines: Vec<(AssertionStyle, String)> = assertion_lines(&case.code)
            .map(|(style, line)| (style, line.to_string()))
            .collect();

        let mode = self.config.assertion_mode;
        let result = match mode {
            AssertionMode::FirstOnly => match lines.first() {
                Some((style, line)) => self.run_first(case, *style, line),
                None => no_assertions(case),
            },
            AssertionMode::All if lines.is_empty() => no_assertions(case),
            AssertionMode::All => self.run_all(case, &lines),
        };

        trace!(test = %result.name, passed = ?result.passed, "case finished");
        result
    }

    fn run_first(&mut self, mut case: TestCase, style: AssertionStyle, line: &str) -> TestCase {
        match self.check(style, line) {
            Ok(checked) => {
                if checked.passed() {
                    case.passed = Some(true);
                } else {
                    let err = checked.mismatch();
                    case = case.fail(err.kind(), err.to_string());
                }
                case.actual = Some(checked.actual);
                case.expected = Some(checked.expected);
                case
            }
            Err(err) => case.fail(err.kind(), err.to_string()),
        }
    }

    /// Evaluate every line; report the first failure's kind and values and
    /// every failure's message.
    fn run_all(&mut self, mut case: TestCase, lines: &[(AssertionStyle, String)]) -> TestCase {
        let mut messages = Vec::new();
        let mut first_failure: Option<(FailureKind, Option<Checked>)> = None;
        let mut last_pass = None;

        for (style, line) in lines {
            match self.check(*style, line) {
                Ok(checked) if checked.passed() => last_pass = Some(checked),
                Ok(checked) => {
                    let err = checked.mismatch();
                    messages.push(err.to_string());
                    if first_failure.is_none() {
                        first_failure = Some((err.kind(), Some(checked)));
                    }
                }
                Err(err) => {
                    messages.push(err.to_string());
                    if first_failure.is_none() {
                        first_failure = Some((err.kind(), None));
                    }
                }
            }
        }

        let shown = match first_failure {
            Some((kind, checked)) => {
                case = case.fail(kind, messages.join("; "));
                checked
            }
            None => {
                case.passed = Some(true);
                last_pass
            }
        };
        if let Some(checked) = shown {
            case.actual = Some(checked.actual);
            case.expected = Some(checked.expected);
        }
        case
    }

    /// Parse the line, call the function, then parse the expected value.
    fn check(&mut self, style: AssertionStyle, line: &str) -> Result<Checked, CaseError> {
        let assertion = parse_assertion_line(style, line)?;
        let call = parse_call(&assertion.call)?;
        let actual = self.interpreter.execute(&call.name, &call.args)?;
        let expected = parse_literal(&assertion.expected)?;
        Ok(Checked { actual, expected })
    }
}

fn no_assertions(case: TestCase) -> TestCase {
    let err = CaseError::NoAssertions;
    case.fail(err.kind(), err.to_string())
}
