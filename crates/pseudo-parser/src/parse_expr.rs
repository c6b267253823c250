//! Expression compiler.
//!
//! Resolution order, first match wins:
//! 1. number literal, 2. quoted text, 3. `true` / `false` / `null`,
//! 4. bare identifier, 5. binary operator split, 6. otherwise invalid.
//!
//! Binary splitting walks the precedence table loosest level first and
//! splits at the *last* operator of that level found outside quotes, which
//! makes every level left-associative:
//!
//! ```text
//! 2 + 3 * 4    →  2 + (3 * 4)   = 14
//! 10 - 2 - 3   →  (10 - 2) - 3  = 5
//! n % 2 == 0   →  (n % 2) == 0
//! ```

use crate::literal::{is_identifier, literal_value};
use pseudo_types::ast::{BinaryOp, Expr, Expression};
use pseudo_types::reference::PRECEDENCE;

/// Compile expression text, keeping the trimmed source alongside.
pub fn parse_expression(text: &str) -> Expression {
    let source = text.trim();
    Expression {
        source: source.to_string(),
        expr: compile_expression(source),
    }
}

/// Compile expression text into an [`Expr`] tree.
pub fn compile_expression(text: &str) -> Expr {
    let text = text.trim();

    if let Some(value) = literal_value(text) {
        return Expr::Literal(value);
    }
    if is_identifier(text) {
        return Expr::Variable(text.to_string());
    }

    for level in PRECEDENCE {
        if let Some((at, op)) = find_last_operator(text, level) {
            let width = op.symbol().len() + 2;
            return Expr::Binary {
                op,
                left: Box::new(compile_expression(&text[..at])),
                right: Box::new(compile_expression(&text[at + width..])),
            };
        }
    }

    Expr::Invalid(text.to_string())
}

/// Byte offset of the last ` op ` (space, symbol, space) outside quotes.
fn find_last_operator(text: &str, ops: &[BinaryOp]) -> Option<(usize, BinaryOp)> {
    let bytes = text.as_bytes();
    let mut quote: Option<u8> = None;
    let mut found = None;

    for (i, &b) in bytes.iter().enumerate() {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                }
            }
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b' ' => {
                let rest = &bytes[i + 1..];
                for &op in ops {
                    let sym = op.symbol().as_bytes();
                    if rest.starts_with(sym) && rest.get(sym.len()) == Some(&b' ') {
                        found = Some((i, op));
                    }
                }
            }
            None => {}
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use pseudo_types::Value;

    fn num(n: f64) -> Box<Expr> {
        Box::new(Expr::Literal(Value::Number(n)))
    }

    fn var(name: &str) -> Box<Expr> {
        Box::new(Expr::Variable(name.to_string()))
    }

    #[test]
    fn test_literals_and_variables() {
        assert_eq!(compile_expression("42"), Expr::Literal(Value::Number(42.0)));
        assert_eq!(compile_expression(" 'x' "), Expr::Literal(Value::from("x")));
        assert_eq!(compile_expression("null"), Expr::Literal(Value::Null));
        assert_eq!(compile_expression("total_2"), Expr::Variable("total_2".into()));
    }

    #[test]
    fn test_addition_binds_looser_than_multiplication() {
        assert_eq!(
            compile_expression("2 + 3 * 4"),
            Expr::Binary {
                op: BinaryOp::Add,
                left: num(2.0),
                right: Box::new(Expr::Binary {
                    op: BinaryOp::Mul,
                    left: num(3.0),
                    right: num(4.0),
                }),
            }
        );
    }

    #[test]
    fn test_subtraction_is_left_associative() {
        assert_eq!(
            compile_expression("10 - 2 - 3"),
            Expr::Binary {
                op: BinaryOp::Sub,
                left: Box::new(Expr::Binary {
                    op: BinaryOp::Sub,
                    left: num(10.0),
                    right: num(2.0),
                }),
                right: num(3.0),
            }
        );
    }

    #[test]
    fn test_equality_is_loosest() {
        assert_eq!(
            compile_expression("n % 2 == 0"),
            Expr::Binary {
                op: BinaryOp::Eq,
                left: Box::new(Expr::Binary {
                    op: BinaryOp::Rem,
                    left: var("n"),
                    right: num(2.0),
                }),
                right: num(0.0),
            }
        );
    }

    #[test]
    fn test_operators_need_surrounding_spaces() {
        assert_eq!(compile_expression("a+b"), Expr::Invalid("a+b".into()));
        assert_eq!(
            compile_expression("a - -1"),
            Expr::Binary {
                op: BinaryOp::Sub,
                left: var("a"),
                right: num(-1.0),
            }
        );
    }

    #[test]
    fn test_operators_inside_quotes_are_ignored() {
        assert_eq!(
            compile_expression("'a + b' == x"),
            Expr::Binary {
                op: BinaryOp::Eq,
                left: Box::new(Expr::Literal(Value::from("a + b"))),
                right: var("x"),
            }
        );
    }

    #[test]
    fn test_parse_expression_keeps_source() {
        let e = parse_expression("  a * b ");
        assert_eq!(e.source, "a * b");
        assert!(matches!(e.expr, Expr::Binary { op: BinaryOp::Mul, .. }));
    }

    #[test]
    fn test_parentheses_are_not_supported() {
        assert_eq!(compile_expression("(1)"), Expr::Invalid("(1)".into()));
    }
}
