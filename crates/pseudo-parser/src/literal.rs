//! Literal and call-text recognition shared by expressions and assertions.

use crate::error::{ParseError, ParseResult};
use pseudo_types::ast::Call;
use pseudo_types::Value;

/// `-?digits(.digits)?`
pub fn is_number_literal(text: &str) -> bool {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let (int, frac) = match digits.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (digits, None),
    };
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    all_digits(int) && frac.is_none_or(all_digits)
}

/// Strip a matching pair of single or double quotes.
///
/// The quoted body may not contain its own quote character; there are no
/// escapes.
pub fn unquote(text: &str) -> Option<&str> {
    let quote = text.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let body = text.strip_prefix(quote)?.strip_suffix(quote)?;
    (!body.contains(quote)).then_some(body)
}

/// Letters, digits and underscores only.
pub fn is_identifier(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// Recognize a literal in already-trimmed text.
pub fn literal_value(text: &str) -> Option<Value> {
    if is_number_literal(text) {
        return text.parse::<f64>().ok().map(Value::Number);
    }
    if let Some(body) = unquote(text) {
        return Some(Value::Text(body.to_string()));
    }
    match text {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        _ => None,
    }
}

/// Parse an argument or expected value. Only literals are accepted.
pub fn parse_literal(text: &str) -> ParseResult<Value> {
    let text = text.trim();
    literal_value(text).ok_or_else(|| ParseError::UnparsableLiteral(text.to_string()))
}

/// Parse `name(arg, arg, ...)` with literal arguments.
pub fn parse_call(text: &str) -> ParseResult<Call> {
    let text = text.trim();
    let invalid = || ParseError::InvalidFunctionCall(text.to_string());

    let open = text.find('(').ok_or_else(invalid)?;
    let name = text[..open].trim_end();
    let inner = text[open + 1..].strip_suffix(')').ok_or_else(invalid)?;
    if !is_identifier(name) {
        return Err(invalid());
    }

    let args = if inner.trim().is_empty() {
        Vec::new()
    } else {
        split_args(inner)
            .into_iter()
            .map(parse_literal)
            .collect::<ParseResult<Vec<_>>>()?
    };

    Ok(Call {
        name: name.to_string(),
        args,
    })
}

/// Split on commas that are not inside quotes.
fn split_args(inner: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut quote: Option<u8> = None;
    let mut start = 0;
    for (i, b) in inner.bytes().enumerate() {
        match quote {
            Some(q) if b == q => quote = None,
            Some(_) => {}
            None if b == b'"' || b == b'\'' => quote = Some(b),
            None if b == b',' => {
                parts.push(&inner[start..i]);
                start = i + 1;
            }
            None => {}
        }
    }
    parts.push(&inner[start..]);
    parts
}
