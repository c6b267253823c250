//! Language reference for learners and editor tooling.
//!
//! Lists exactly what the interpreter and test runner accept. Built from
//! the tables below so the text and the operator list cannot drift apart.

use crate::ast::BinaryOp;

/// Operators in precedence order, loosest first.
pub const PRECEDENCE: &[&[BinaryOp]] = &[
    &[BinaryOp::Eq],
    &[BinaryOp::Add, BinaryOp::Sub],
    &[BinaryOp::Mul, BinaryOp::Div, BinaryOp::Rem],
];

/// Statement forms, `(syntax, description)`.
const STATEMENTS: &[(&str, &str)] = &[
    ("FUNCTION name(a, b)", "Open a function with positional parameters"),
    ("SET name = expr", "Bind a variable in the current call"),
    ("RETURN expr", "Stop and yield the value of expr"),
    ("IF cond THEN", "Accepted but not executed"),
    ("END", "Close the open function"),
    ("// text", "Comment line"),
];

/// Test-script forms, `(syntax, description)`.
const TEST_FORMS: &[(&str, &str)] = &[
    ("TEST \"name\"", "Open a named test"),
    ("ASSERT f(1, 2) == 3", "Call f with literal arguments and compare"),
    ("EXPECT f(1, 2) TO_BE 3", "Same check, alternate spelling"),
    ("END  or  END TEST", "Close the test"),
];

pub const EXAMPLE_FUNCTION: &str = "FUNCTION add(a, b)\n  RETURN a + b\nEND";

pub const EXAMPLE_TESTS: &str = "TEST \"add returns the sum\"\n  ASSERT add(2, 3) == 5\nEND\n\nTEST \"add handles negatives\"\n  EXPECT add(-1, 1) TO_BE 0\nEND";

/// Render the full reference as plain text.
pub fn generate_reference() -> String {
    let mut out = String::new();

    out.push_str("# Pseudocode reference\n\n## Statements\n");
    push_table(&mut out, STATEMENTS);

    out.push_str("\n## Expressions\n");
    out.push_str("  literals     42  -1.5  \"text\"  'text'  true  false  null\n");
    out.push_str("  variables    letters, digits and _ ; unbound names are null\n");
    out.push_str("  operators    need one space on each side, loosest first:\n");
    for level in PRECEDENCE {
        let symbols: Vec<&str> = level.iter().map(|op| op.symbol()).collect();
        out.push_str(&format!("               {}\n", symbols.join("  ")));
    }
    out.push_str("  no parentheses, no calls inside expressions\n");

    out.push_str("\n## Tests\n");
    push_table(&mut out, TEST_FORMS);
    out.push_str("  arguments and expected values must be literals\n");
    out.push_str("  only the first ASSERT/EXPECT of a test is checked by default\n");

    out.push_str("\n## Not supported\n");
    out.push_str("  IF/ELSE bodies, FOR and WHILE loops, AND/OR/NOT, != < > <= >=\n");

    out.push_str("\n## Example\n");
    out.push_str(EXAMPLE_FUNCTION);
    out.push_str("\n\n");
    out.push_str(EXAMPLE_TESTS);
    out.push('\n');
    out
}

fn push_table(out: &mut String, rows: &[(&str, &str)]) {
    let width = rows.iter().map(|(s, _)| s.len()).max().unwrap_or(0);
    for (syntax, description) in rows {
        out.push_str(&format!("  {syntax:<width$}  {description}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_lists_every_operator() {
        let text = generate_reference();
        for op in PRECEDENCE.iter().flat_map(|level| level.iter()) {
            assert!(text.contains(op.symbol()), "missing operator {op}");
        }
    }

    #[test]
    fn test_reference_is_deterministic() {
        assert_eq!(generate_reference(), generate_reference());
    }

    #[test]
    fn test_reference_mentions_capability_boundary() {
        let text = generate_reference();
        assert!(text.contains("IF cond THEN"));
        assert!(text.contains("Not supported"));
    }
}
