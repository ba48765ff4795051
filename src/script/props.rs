//! Property declaration extraction.
//!
//! The script is tokenized, the object literal bound to the `props` key is
//! sliced out by brace depth, and only that slice is handed to the
//! restricted literal parser. Imports, other exports and function bodies in
//! the surrounding script are never looked at.
use super::lexer::{tokenize, LexError, Token};
use super::literal::{parse_object_literal, Literal, LiteralError};
use thiserror::Error;

const PROPS_IDENT: &str = "props";

#[derive(Debug, Error)]
pub enum PropsError {
    #[error("tokenize script: {0}")]
    Lex(#[from] LexError),
    #[error("props object opened at byte {0} is never closed")]
    Unclosed(usize),
    #[error("evaluate props object: {0}")]
    Literal(#[from] LiteralError),
}

/// Declared properties in declaration order, each with its raw metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyMap {
    entries: Vec<(String, Literal)>,
}

impl PropertyMap {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl From<Vec<(String, Literal)>> for PropertyMap {
    fn from(entries: Vec<(String, Literal)>) -> Self {
        Self { entries }
    }
}

/// Extract the `props` declaration from component script text.
///
/// The first `props` key or binding whose value is an object literal is
/// used. Without one (`props: ['a', 'b']`, `props: shared`) the map is empty.
pub fn extract_props(script: &str) -> Result<PropertyMap, PropsError> {
    let tokens = tokenize(script)?;
    let Some(open) = find_props_object(&tokens) else {
        return Ok(PropertyMap::default());
    };
    let close = matching_brace(&tokens, open).ok_or(PropsError::Unclosed(tokens[open].start))?;
    let slice = &script[tokens[open].start..tokens[close].end()];
    tracing::debug!(bytes = slice.len(), "props object sliced");
    let entries = parse_object_literal(slice)?;
    Ok(PropertyMap::from(entries))
}

/// Index of the `{` opening the first props object declaration.
fn find_props_object(tokens: &[Token<'_>]) -> Option<usize> {
    for (index, token) in tokens.iter().enumerate() {
        if !token.is_ident(PROPS_IDENT) {
            continue;
        }
        let member_access = index > 0 && {
            let previous = &tokens[index - 1];
            previous.is_punct(".") || previous.is_punct("?.")
        };
        if member_access {
            continue;
        }
        let declares = tokens
            .get(index + 1)
            .is_some_and(|next| next.is_punct(":") || next.is_punct("="));
        if !declares {
            continue;
        }
        if tokens.get(index + 2).is_some_and(|value| value.is_punct("{")) {
            return Some(index + 2);
        }
    }
    None
}

fn matching_brace(tokens: &[Token<'_>], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (index, token) in tokens.iter().enumerate().skip(open) {
        if token.is_punct("{") {
            depth += 1;
        } else if token.is_punct("}") {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "props_tests.rs"]
mod tests;
