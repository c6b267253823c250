//! Parser integration tests.
//!
//! Covers:
//! 1. Function boundaries and source order (including a property test)
//! 2. Statement forms inside bodies, and what is silently dropped
//! 3. The IF capability boundary
//! 4. Test-script parsing against real exercise scripts

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use pseudo_parser::{parse_program, parse_test_script};
use pseudo_types::ast::{BinaryOp, Expr, Statement};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn render_function(name: &str, params: &[String]) -> String {
    format!(
        "FUNCTION {name}({})\n  SET tmp = 1\n  RETURN tmp\nEND\n",
        params.join(", ")
    )
}

fn statement_kinds(body: &[Statement]) -> Vec<&'static str> {
    body.iter()
        .map(|s| match s {
            Statement::Assignment { .. } => "set",
            Statement::Return { .. } => "return",
            Statement::If { .. } => "if",
        })
        .collect()
}

// ══════════════════════════════════════════════════════════════════════════════
// Function boundaries
// ══════════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn test_parse_returns_every_function_in_source_order(
        functions in prop::collection::vec(
            ("[a-z][a-z0-9_]{0,8}", prop::collection::vec("[a-z][a-z0-9_]{0,5}", 0..4)),
            0..6,
        )
    ) {
        let source: String = functions
            .iter()
            .map(|(name, params)| render_function(name, params))
            .collect::<Vec<_>>()
            .join("\n");

        let parsed = parse_program(&source);
        prop_assert_eq!(parsed.len(), functions.len());
        for (got, (name, params)) in parsed.iter().zip(&functions) {
            prop_assert_eq!(&got.name, name);
            prop_assert_eq!(&got.parameters, params);
            prop_assert_eq!(got.body.len(), 2);
        }
    }
}

#[test]
fn test_empty_source_has_no_functions() {
    assert!(parse_program("").is_empty());
    assert!(parse_program("// only a comment\n\n").is_empty());
}

#[test]
fn test_lines_outside_functions_are_ignored() {
    let functions = parse_program("SET x = 1\nRETURN x\nFUNCTION f()\nRETURN 2\nEND\nRETURN 3");
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].body.len(), 1);
}

#[test]
fn test_indentation_and_crlf_do_not_matter() {
    let functions = parse_program("FUNCTION add(a, b)\r\n    RETURN a + b\r\nEND\r\n");
    assert_eq!(functions.len(), 1);
    assert_eq!(functions[0].parameters, vec!["a", "b"]);
    match &functions[0].body[0] {
        Statement::Return { value } => {
            assert_eq!(value.source, "a + b");
            assert!(matches!(value.expr, Expr::Binary { op: BinaryOp::Add, .. }));
        }
        other => panic!("expected return, got {other:?}"),
    }
}

#[test]
fn test_unrecognized_body_lines_are_dropped() {
    let functions = parse_program(
        "FUNCTION sum(numbers)\n  SET total = 0\n  FOR i FROM 0 TO 3 DO\n  PRINT total\n  RETURN total\nEND",
    );
    assert_eq!(statement_kinds(&functions[0].body), vec!["set", "return"]);
}

// ══════════════════════════════════════════════════════════════════════════════
// IF capability boundary
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_if_lines_become_empty_shells_and_first_end_closes_function() {
    let functions = parse_program(
        "FUNCTION isEven(number)\n  IF number % 2 == 0 THEN\n    RETURN true\n  ELSE\n    RETURN false\n  END\nEND",
    );
    assert_eq!(functions.len(), 1);
    assert_eq!(
        statement_kinds(&functions[0].body),
        vec!["if", "return", "return"]
    );
    match &functions[0].body[0] {
        Statement::If {
            then_block,
            else_block,
            ..
        } => {
            assert!(then_block.is_empty());
            assert!(else_block.is_empty());
        }
        other => panic!("expected if, got {other:?}"),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Test scripts
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_exercise_script_parses_into_named_cases() {
    let script = r#"TEST "isEven should return true for even numbers"
  ASSERT isEven(2) == true
  ASSERT isEven(4) == true
END

TEST "isEven should return false for odd numbers"
  ASSERT isEven(1) == false
  ASSERT isEven(3) == false
END

TEST "isEven should handle zero"
  ASSERT isEven(0) == true
END"#;

    let tests = parse_test_script(script);
    let names: Vec<_> = tests.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "\"isEven should return true for even numbers\"",
            "\"isEven should return false for odd numbers\"",
            "\"isEven should handle zero\"",
        ]
    );
    assert_eq!(
        tests[0].code,
        "ASSERT isEven(2) == true\nASSERT isEven(4) == true"
    );
}

#[test]
fn test_empty_script_has_no_cases() {
    assert!(parse_test_script("").is_empty());
    assert!(parse_test_script("END\nEND TEST").is_empty());
}
