//! Program parser: source text to [`Function`] definitions.

use crate::literal::is_identifier;
use crate::parse_expr::parse_expression;
use crate::significant_lines;
use pseudo_types::ast::{Function, Statement};
use tracing::trace;

/// Parse source into functions, in source order.
///
/// `FUNCTION name(params)` opens a function, `END` closes it and any other
/// line inside a function is handed to [`parse_statement`]. Lines outside
/// a function and unrecognized statements are dropped. A function still
/// open at the end of the source is kept.
pub fn parse_program(source: &str) -> Vec<Function> {
    let mut parser = ProgramParser::default();
    for line in significant_lines(source) {
        parser.line(line);
    }
    parser.finish()
}

#[derive(Default)]
struct ProgramParser {
    functions: Vec<Function>,
    current: Option<Function>,
}

impl ProgramParser {
    fn line(&mut self, line: &str) {
        if line.starts_with("FUNCTION ") {
            self.close();
            self.current = match parse_function_header(line) {
                Some((name, parameters)) => Some(Function {
                    name,
                    parameters,
                    body: Vec::new(),
                }),
                None => {
                    trace!(line, "malformed function header");
                    None
                }
            };
        } else if line == "END" {
            self.close();
        } else if let Some(function) = self.current.as_mut() {
            match parse_statement(line) {
                Some(stmt) => function.body.push(stmt),
                None => trace!(function = %function.name, line, "dropping unrecognized line"),
            }
        }
    }

    fn close(&mut self) {
        if let Some(function) = self.current.take() {
            self.functions.push(function);
        }
    }

    fn finish(mut self) -> Vec<Function> {
        self.close();
        self.functions
    }
}

/// Parse `FUNCTION name(a, b)` into the name and parameter list.
///
/// Text after the closing parenthesis is ignored; empty parameter slots
/// (`f(a, )`) are skipped.
pub fn parse_function_header(line: &str) -> Option<(String, Vec<String>)> {
    let rest = line.strip_prefix("FUNCTION")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();

    let open = rest.find('(')?;
    let name = rest[..open].trim_end();
    if !is_identifier(name) {
        return None;
    }
    let close = rest[open..].find(')')? + open;

    let parameters = rest[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect();

    Some((name.to_string(), parameters))
}

/// Parse a single body line. `None` means the line is not a statement.
pub fn parse_statement(line: &str) -> Option<Statement> {
    if line.starts_with("SET ") {
        return parse_assignment(line);
    }
    if let Some(value) = line.strip_prefix("RETURN ") {
        return Some(Statement::Return {
            value: parse_expression(value),
        });
    }
    if line.starts_with("IF ") {
        return parse_if(line);
    }
    None
}

/// `SET name = expr`
fn parse_assignment(line: &str) -> Option<Statement> {
    let rest = line["SET".len()..].trim_start();
    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let (variable, rest) = rest.split_at(name_len);
    if variable.is_empty() {
        return None;
    }

    let value = rest.trim_start().strip_prefix('=')?.trim();
    if value.is_empty() {
        return None;
    }

    Some(Statement::Assignment {
        variable: variable.to_string(),
        value: parse_expression(value),
    })
}

/// `IF cond THEN`: only the condition is kept.
fn parse_if(line: &str) -> Option<Statement> {
    let rest = &line["IF".len()..];
    let (at, _) = rest
        .match_indices("THEN")
        .filter(|(i, _)| rest[..*i].ends_with(char::is_whitespace))
        .last()?;
    let condition = rest[..at].trim();
    if condition.is_empty() {
        return None;
    }

    Some(Statement::If {
        condition: parse_expression(condition),
        then_block: Vec::new(),
        else_block: Vec::new(),
    })
}
