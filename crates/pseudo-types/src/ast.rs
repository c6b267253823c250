//! Statement and expression model for pseudocode functions.
//!
//! Expressions keep their source text next to the compiled [`Expr`] tree:
//! the text is what the learner wrote and what diagnostics show, the tree
//! is what the interpreter walks.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// Binary operators, recognized only when written with a single space on
/// each side (`a + b`, never `a+b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
}

impl BinaryOp {
    /// The operator as written in source, without surrounding spaces.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "==",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A compiled expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Number, quoted text, `true`, `false` or `null`.
    Literal(Value),
    /// Bare identifier; unbound names evaluate to null.
    Variable(String),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// Text matching no expression form. Evaluates to null.
    Invalid(String),
}

/// Expression source text together with its compiled tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub source: String,
    pub expr: Expr,
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements & Functions
// ══════════════════════════════════════════════════════════════════════════════

/// A statement inside a function body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Statement {
    /// `SET name = expr`
    Assignment { variable: String, value: Expression },
    /// `RETURN expr`
    Return { value: Expression },
    /// `IF cond THEN` — parsed into a shell only. The blocks are never
    /// populated and the interpreter skips this statement.
    If {
        condition: Expression,
        then_block: Vec<Statement>,
        else_block: Vec<Statement>,
    },
}

/// `FUNCTION name(params) ... END`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Statement>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Assertions
// ══════════════════════════════════════════════════════════════════════════════

/// Which assertion keyword a test line used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssertionStyle {
    /// `ASSERT call == expected`
    Assert,
    /// `EXPECT call TO_BE expected`
    Expect,
}

/// An assertion line split into its call text and expected-value text.
///
/// Both parts stay unparsed: the call is parsed and executed before the
/// expected literal is parsed, so a missing function is reported ahead of a
/// malformed expected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionLine {
    pub call: String,
    pub expected: String,
}

/// A parsed `name(arg, ...)` call with literal arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub name: String,
    pub args: Vec<Value>,
}
