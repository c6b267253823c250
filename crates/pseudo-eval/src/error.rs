//! Runtime error types for the pseudocode interpreter.

use pseudo_types::FailureKind;
use thiserror::Error;

/// Evaluation error.
///
/// Expressions never fail (bad arithmetic and unbound names yield null), so
/// the only runtime failure is calling a function that was never loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Function '{0}' not found")]
    FunctionNotFound(String),
}

impl EvalError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::FunctionNotFound(_) => FailureKind::FunctionNotFound,
        }
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
