//! Lexical tokenizer for component script text.
//!
//! Only the token boundaries matter here: strings, template literals, regex
//! literals and comments are recognized so that braces inside them never
//! count toward object nesting. Whitespace and comments are dropped.
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Punctuator,
    String,
    /// Template literal; `substitutions` is set when it contains `${...}`.
    Template { substitutions: bool },
    Number,
    Regex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub start: usize,
}

impl Token<'_> {
    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }

    pub fn is_punct(&self, value: &str) -> bool {
        self.kind == TokenKind::Punctuator && self.text == value
    }

    pub fn is_ident(&self, value: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == value
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal at byte {0}")]
    UnterminatedString(usize),
    #[error("unterminated template literal at byte {0}")]
    UnterminatedTemplate(usize),
    #[error("unterminated block comment at byte {0}")]
    UnterminatedComment(usize),
    #[error("unterminated regular expression at byte {0}")]
    UnterminatedRegex(usize),
    #[error("unexpected character {ch:?} at byte {offset}")]
    UnexpectedChar { ch: char, offset: usize },
}

// Longest first so a prefix never shadows a longer operator.
const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "?.", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=",
    "|=", "^=", "**", "<<", ">>", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-",
    "*", "/", "%", "&", "|", "^", "!", "~", "?", ":", "=", ".", "@",
];

// Keywords after which a `/` starts a regular expression rather than a division.
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
];

pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    while let Some(token) = lexer.next_token(tokens.last())? {
        tokens.push(token);
    }
    Ok(tokens)
}

struct Lexer<'src> {
    source: &'src str,
    position: usize,
}

impl<'src> Lexer<'src> {
    fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    fn rest(&self) -> &'src str {
        &self.source[self.position..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token<'src> {
        Token {
            kind,
            text: &self.source[start..self.position],
            start,
        }
    }

    fn next_token(&mut self, previous: Option<&Token<'src>>) -> Result<Option<Token<'src>>, LexError> {
        self.skip_trivia()?;
        let start = self.position;
        let Some(c) = self.peek_char() else {
            return Ok(None);
        };

        let kind = match c {
            '\'' | '"' => {
                self.scan_string(c)?;
                TokenKind::String
            }
            '`' => {
                let substitutions = self.scan_template()?;
                TokenKind::Template { substitutions }
            }
            '.' if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) => {
                self.scan_number();
                TokenKind::Number
            }
            c if c.is_ascii_digit() => {
                self.scan_number();
                TokenKind::Number
            }
            '/' if regex_allowed(previous) => {
                self.scan_regex()?;
                TokenKind::Regex
            }
            '#' if self.peek_char_n(1).is_some_and(is_identifier_start) => {
                self.advance();
                self.scan_identifier();
                TokenKind::Identifier
            }
            c if is_identifier_start(c) => {
                self.scan_identifier();
                TokenKind::Identifier
            }
            _ => {
                self.scan_punctuator()
                    .ok_or(LexError::UnexpectedChar { ch: c, offset: start })?;
                TokenKind::Punctuator
            }
        };

        Ok(Some(self.token(kind, start)))
    }

    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            let rest = self.rest();
            if rest.starts_with("//") {
                let len = rest.find('\n').unwrap_or(rest.len());
                self.position += len;
            } else if rest.starts_with("/*") {
                let start = self.position;
                let len = rest[2..]
                    .find("*/")
                    .ok_or(LexError::UnterminatedComment(start))?;
                self.position += len + 4;
            } else if self.peek_char().is_some_and(|c| c.is_whitespace() || c == '\u{feff}') {
                self.advance();
            } else {
                return Ok(());
            }
        }
    }

    fn scan_string(&mut self, quote: char) -> Result<(), LexError> {
        let start = self.position;
        self.advance();
        loop {
            match self.advance() {
                Some(c) if c == quote => return Ok(()),
                Some('\\') => {
                    self.advance();
                }
                Some('\n') | None => return Err(LexError::UnterminatedString(start)),
                Some(_) => {}
            }
        }
    }

    /// Scans a template literal, lexing `${...}` substitutions as nested code.
    fn scan_template(&mut self) -> Result<bool, LexError> {
        let start = self.position;
        let mut substitutions = false;
        self.advance();
        loop {
            match self.advance() {
                Some('`') => return Ok(substitutions),
                Some('\\') => {
                    self.advance();
                }
                Some('$') if self.peek_char() == Some('{') => {
                    self.advance();
                    substitutions = true;
                    self.skip_substitution(start)?;
                }
                Some(_) => {}
                None => return Err(LexError::UnterminatedTemplate(start)),
            }
        }
    }

    fn skip_substitution(&mut self, template_start: usize) -> Result<(), LexError> {
        let mut depth = 1usize;
        let mut previous: Option<Token<'src>> = None;
        while depth > 0 {
            let token = self
                .next_token(previous.as_ref())?
                .ok_or(LexError::UnterminatedTemplate(template_start))?;
            if token.is_punct("{") {
                depth += 1;
            } else if token.is_punct("}") {
                depth -= 1;
            }
            previous = Some(token);
        }
        Ok(())
    }

    fn scan_number(&mut self) {
        let radix_prefix = self.peek_char() == Some('0')
            && matches!(
                self.peek_char_n(1),
                Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')
            );
        if radix_prefix {
            self.advance();
            self.advance();
            while self
                .peek_char()
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '_')
            {
                self.advance();
            }
        } else {
            while self
                .peek_char()
                .is_some_and(|c| c.is_ascii_digit() || c == '_' || c == '.')
            {
                self.advance();
            }
            if matches!(self.peek_char(), Some('e' | 'E')) {
                let signed = matches!(self.peek_char_n(1), Some('+' | '-'));
                let digit_at = if signed { 2 } else { 1 };
                if self.peek_char_n(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                    for _ in 0..digit_at {
                        self.advance();
                    }
                    while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                        self.advance();
                    }
                }
            }
        }
        if self.peek_char() == Some('n') {
            self.advance();
        }
    }

    fn scan_regex(&mut self) -> Result<(), LexError> {
        let start = self.position;
        self.advance();
        let mut in_class = false;
        loop {
            match self.advance() {
                Some('\\') => {
                    self.advance();
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some('\n') | None => return Err(LexError::UnterminatedRegex(start)),
                Some(_) => {}
            }
        }
        while self.peek_char().is_some_and(is_identifier_part) {
            self.advance();
        }
        Ok(())
    }

    fn scan_identifier(&mut self) {
        while self.peek_char().is_some_and(is_identifier_part) {
            self.advance();
        }
    }

    fn scan_punctuator(&mut self) -> Option<()> {
        let rest = self.rest();
        let punct = PUNCTUATORS.iter().find(|p| rest.starts_with(**p))?;
        // `a?.5:b` is a conditional, not optional chaining.
        if *punct == "?." && rest[2..].starts_with(|c: char| c.is_ascii_digit()) {
            self.position += 1;
        } else {
            self.position += punct.len();
        }
        Some(())
    }
}

fn regex_allowed(previous: Option<&Token<'_>>) -> bool {
    let Some(previous) = previous else {
        return true;
    };
    match previous.kind {
        TokenKind::Punctuator => !matches!(previous.text, ")" | "]" | "}"),
        TokenKind::Identifier => REGEX_PREFIX_KEYWORDS.contains(&previous.text),
        _ => false,
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}
