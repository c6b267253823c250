//! Parse error types.

use pseudo_types::FailureKind;
use thiserror::Error;

/// Errors raised while reading an assertion line.
///
/// Program parsing never fails: unrecognized lines are dropped. Only the
/// test-script side reports malformed input, one case at a time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid ASSERT syntax")]
    InvalidAssertSyntax,

    #[error("Invalid EXPECT syntax")]
    InvalidExpectSyntax,

    /// Call text is not of the form `name(args)`.
    #[error("Invalid function call: {0}")]
    InvalidFunctionCall(String),

    /// An argument or expected value is not a literal.
    #[error("Cannot parse value: {0}")]
    UnparsableLiteral(String),
}

impl ParseError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::InvalidAssertSyntax => FailureKind::InvalidAssertSyntax,
            Self::InvalidExpectSyntax => FailureKind::InvalidExpectSyntax,
            Self::InvalidFunctionCall(_) => FailureKind::InvalidFunctionCall,
            Self::UnparsableLiteral(_) => FailureKind::UnparsableLiteral,
        }
    }
}

/// Parser result type alias.
pub type ParseResult<T> = Result<T, ParseError>;
