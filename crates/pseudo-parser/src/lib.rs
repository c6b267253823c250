//! Pseudocode parser: turns source lines into functions and test cases.
//!
//! Both the language and the test scripts are line-oriented. Every line is
//! trimmed; blank lines and `//` comment lines are skipped before any
//! keyword is recognized.

mod error;
pub mod literal;
mod parse_expr;
mod parser;

pub use error::{ParseError, ParseResult};
pub use literal::{parse_call, parse_literal};
pub use parse_expr::{compile_expression, parse_expression};
pub use parse_test::{assertion_lines, parse_assertion_line, parse_test_script};
pub use parser::{parse_function_header, parse_program, parse_statement};

/// Trimmed, non-blank, non-comment lines of `source`.
pub(crate) fn significant_lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
}
