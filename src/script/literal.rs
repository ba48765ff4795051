//! Restricted literal parser for declarative script values.
//!
//! Accepts object, array, string, number, boolean, `null` and `undefined`
//! literals. Every other expression (identifiers, functions, calls,
//! operators) is skipped up to the next delimiter and kept as
//! [`Literal::Opaque`]; nothing is ever evaluated.
use super::lexer::{tokenize, LexError, Token, TokenKind};
use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Undefined,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Literal>),
    /// Entries in first-declaration order; a repeated key replaces the value in place.
    Object(Vec<(String, Literal)>),
    /// An expression that has no JSON form (function, identifier reference, call, ...).
    Opaque,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected token {text:?} at byte {offset}")]
    UnexpectedToken { text: String, offset: usize },
    #[error("expected an object literal")]
    NotAnObject,
}

impl Literal {
    /// Convert to JSON the way an encode/decode round-trip would.
    ///
    /// `None` means the value has no JSON form: callers drop it from objects,
    /// while arrays store `null` in its place.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Literal::Null => Some(Value::Null),
            Literal::Undefined | Literal::Opaque => None,
            Literal::Bool(value) => Some(Value::Bool(*value)),
            Literal::Number(value) => Some(number_to_json(*value)),
            Literal::String(value) => Some(Value::String(value.clone())),
            Literal::Array(items) => Some(Value::Array(
                items
                    .iter()
                    .map(|item| item.to_json().unwrap_or(Value::Null))
                    .collect(),
            )),
            Literal::Object(entries) => {
                let mut map = Map::new();
                for (key, value) in entries {
                    if let Some(value) = value.to_json() {
                        map.insert(key.clone(), value);
                    }
                }
                Some(Value::Object(map))
            }
        }
    }
}

fn number_to_json(value: f64) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Value::Number(Number::from(value as i64));
    }
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

/// Parse `source` as a single object literal and return its entries.
pub fn parse_object_literal(source: &str) -> Result<Vec<(String, Literal)>, LiteralError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser::new(&tokens);
    match parser.peek() {
        Some(token) if token.is_punct("{") => {}
        Some(_) => return Err(LiteralError::NotAnObject),
        None => return Err(LiteralError::UnexpectedEnd),
    }
    let entries = parser.parse_object()?;
    if let Some(token) = parser.peek() {
        return Err(unexpected(token));
    }
    Ok(entries)
}

fn unexpected(token: &Token<'_>) -> LiteralError {
    LiteralError::UnexpectedToken {
        text: token.text.to_string(),
        offset: token.start,
    }
}

struct Parser<'a, 'src> {
    tokens: &'a [Token<'src>],
    pos: usize,
}

impl<'a, 'src> Parser<'a, 'src> {
    fn new(tokens: &'a [Token<'src>]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'a Token<'src>> {
        self.tokens.get(self.pos)
    }

    fn peek_n(&self, n: usize) -> Option<&'a Token<'src>> {
        self.tokens.get(self.pos + n)
    }

    fn next(&mut self) -> Result<&'a Token<'src>, LiteralError> {
        let token = self.tokens.get(self.pos).ok_or(LiteralError::UnexpectedEnd)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect_punct(&mut self, value: &str) -> Result<(), LiteralError> {
        let token = self.next()?;
        if token.is_punct(value) {
            Ok(())
        } else {
            Err(unexpected(token))
        }
    }

    fn at_value_end(&self) -> bool {
        match self.peek() {
            None => true,
            Some(token) => [",", "}", "]", ")"].iter().any(|p| token.is_punct(p)),
        }
    }

    /// Parse one value; anything outside the literal grammar becomes `Opaque`.
    fn parse_value(&mut self) -> Result<Literal, LiteralError> {
        let start = self.pos;
        if let Ok(Some(value)) = self.parse_primary() {
            if self.at_value_end() {
                return Ok(value);
            }
        }
        self.pos = start;
        self.skip_expression()?;
        Ok(Literal::Opaque)
    }

    fn parse_primary(&mut self) -> Result<Option<Literal>, LiteralError> {
        let token = self.next()?;
        let value = match token.kind {
            TokenKind::String => Literal::String(unescape(strip_quotes(token.text))),
            TokenKind::Template {
                substitutions: false,
            } => Literal::String(unescape(strip_quotes(token.text))),
            TokenKind::Number => match parse_number(token.text) {
                Some(value) => Literal::Number(value),
                None => return Ok(None),
            },
            TokenKind::Identifier => match token.text {
                "true" => Literal::Bool(true),
                "false" => Literal::Bool(false),
                "null" => Literal::Null,
                "undefined" => Literal::Undefined,
                "NaN" => Literal::Number(f64::NAN),
                "Infinity" => Literal::Number(f64::INFINITY),
                _ => return Ok(None),
            },
            TokenKind::Punctuator => match token.text {
                "{" => {
                    self.pos -= 1;
                    Literal::Object(self.parse_object()?)
                }
                "[" => {
                    self.pos -= 1;
                    Literal::Array(self.parse_array()?)
                }
                "-" | "+" => {
                    let negate = token.text == "-";
                    match self.parse_primary()? {
                        Some(Literal::Number(value)) if negate => Literal::Number(-value),
                        Some(Literal::Number(value)) => Literal::Number(value),
                        _ => return Ok(None),
                    }
                }
                _ => return Ok(None),
            },
            TokenKind::Template { .. } | TokenKind::Regex => return Ok(None),
        };
        Ok(Some(value))
    }

    fn parse_object(&mut self) -> Result<Vec<(String, Literal)>, LiteralError> {
        self.expect_punct("{")?;
        let mut entries: Vec<(String, Literal)> = Vec::new();
        loop {
            let token = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
            if token.is_punct("}") {
                self.pos += 1;
                return Ok(entries);
            }
            if let Some((key, value)) = self.parse_entry()? {
                match entries.iter_mut().find(|(existing, _)| *existing == key) {
                    Some(entry) => entry.1 = value,
                    None => entries.push((key, value)),
                }
            }
            let token = self.next()?;
            if token.is_punct("}") {
                return Ok(entries);
            }
            if !token.is_punct(",") {
                return Err(unexpected(token));
            }
        }
    }

    /// Parse one object member. Spreads and computed keys yield `None`.
    fn parse_entry(&mut self) -> Result<Option<(String, Literal)>, LiteralError> {
        let token = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        if token.is_punct("...") || token.is_punct("[") {
            self.skip_expression()?;
            return Ok(None);
        }
        if token.is_punct("*") {
            self.pos += 1;
            return self.parse_entry();
        }
        // `get x() {}`, `set x(v) {}`, `async x() {}`
        if matches!(token.text, "get" | "set" | "async")
            && token.kind == TokenKind::Identifier
            && self.peek_n(1).is_some_and(|next| {
                !(next.is_punct(":") || next.is_punct("(") || next.is_punct(",") || next.is_punct("}"))
            })
        {
            self.pos += 1;
            return self.parse_entry();
        }

        let token = self.next()?;
        let key = match token.kind {
            TokenKind::Identifier => token.text.to_string(),
            TokenKind::String => unescape(strip_quotes(token.text)),
            TokenKind::Number => match parse_number(token.text) {
                Some(value) => number_key(value),
                None => return Err(unexpected(token)),
            },
            _ => return Err(unexpected(token)),
        };

        let next = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
        if next.is_punct(":") {
            self.pos += 1;
            let value = self.parse_value()?;
            Ok(Some((key, value)))
        } else if next.is_punct("(") {
            // Method shorthand: parameters, then body.
            self.skip_expression()?;
            Ok(Some((key, Literal::Opaque)))
        } else if next.is_punct(",") || next.is_punct("}") {
            // Shorthand `{ name }` refers to a binding outside the literal.
            Ok(Some((key, Literal::Opaque)))
        } else {
            Err(unexpected(next))
        }
    }

    fn parse_array(&mut self) -> Result<Vec<Literal>, LiteralError> {
        self.expect_punct("[")?;
        let mut items = Vec::new();
        loop {
            let token = self.peek().ok_or(LiteralError::UnexpectedEnd)?;
            if token.is_punct("]") {
                self.pos += 1;
                return Ok(items);
            }
            if token.is_punct(",") {
                // Hole: `[a, , b]`.
                self.pos += 1;
                items.push(Literal::Undefined);
                continue;
            }
            items.push(self.parse_value()?);
            let token = self.next()?;
            if token.is_punct("]") {
                return Ok(items);
            }
            if !token.is_punct(",") {
                return Err(unexpected(token));
            }
        }
    }

    /// Advance past one expression, stopping before a delimiter at depth zero.
    fn skip_expression(&mut self) -> Result<(), LiteralError> {
        let mut depth = 0usize;
        while let Some(token) = self.peek() {
            if token.kind == TokenKind::Punctuator {
                match token.text {
                    "{" | "[" | "(" => depth += 1,
                    "}" | "]" | ")" if depth == 0 => return Ok(()),
                    "}" | "]" | ")" => depth -= 1,
                    "," if depth == 0 => return Ok(()),
                    _ => {}
                }
            }
            self.pos += 1;
        }
        if depth == 0 {
            Ok(())
        } else {
            Err(LiteralError::UnexpectedEnd)
        }
    }
}

fn strip_quotes(text: &str) -> &str {
    &text[1..text.len() - 1]
}

fn number_key(value: f64) -> String {
    match number_to_json(value) {
        Value::Number(number) => number.to_string(),
        _ => value.to_string(),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    // BigInt has no JSON form.
    if text.ends_with('n') {
        return None;
    }
    let cleaned = text.replace('_', "");
    let radix = match cleaned.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    match radix {
        Some(radix) => u64::from_str_radix(&cleaned[2..], radix)
            .ok()
            .map(|value| value as f64),
        None => cleaned.parse::<f64>().ok(),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // Line continuation.
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, &hex);
            }
            'u' => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                push_code_point(&mut out, &hex);
            }
            other => out.push(other),
        }
    }
    out
}

fn push_code_point(out: &mut String, hex: &str) {
    let decoded = u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
    out.push(decoded.unwrap_or('\u{fffd}'));
}

#[cfg(test)]
#[path = "literal_tests.rs"]
mod tests;
