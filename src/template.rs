//! Template markup compiler.
//!
//! Builds a tag tree from component template markup. The parser is
//! tolerant in the same places browsers are (unclosed tags, stray close
//! tags, valueless attributes) and only fails on input it cannot delimit:
//! unterminated comments, tags and quoted attribute values.
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unterminated comment at byte {0}")]
    UnterminatedComment(usize),
    #[error("unterminated tag at byte {0}")]
    UnterminatedTag(usize),
    #[error("unterminated attribute value at byte {0}")]
    UnterminatedAttribute(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateNode {
    pub tag: String,
    /// Attribute names are kept verbatim (`:id` and `id` are distinct).
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<TemplateNode>,
}

impl TemplateNode {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Top-level nodes of a compiled template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRoot {
    pub nodes: Vec<TemplateNode>,
}

pub fn compile_template(source: &str) -> Result<TemplateRoot, TemplateError> {
    let mut parser = TemplateParser {
        source,
        pos: 0,
        stack: Vec::new(),
        roots: Vec::new(),
    };
    parser.run()?;
    Ok(TemplateRoot {
        nodes: parser.roots,
    })
}

struct TemplateParser<'src> {
    source: &'src str,
    pos: usize,
    stack: Vec<TemplateNode>,
    roots: Vec<TemplateNode>,
}

impl<'src> TemplateParser<'src> {
    fn rest(&self) -> &'src str {
        &self.source[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn run(&mut self) -> Result<(), TemplateError> {
        while let Some(c) = self.peek_char() {
            let rest = self.rest();
            if rest.starts_with("{{") {
                self.skip_interpolation();
            } else if rest.starts_with("<!--") {
                let start = self.pos;
                let len = rest[4..]
                    .find("-->")
                    .ok_or(TemplateError::UnterminatedComment(start))?;
                self.pos += 4 + len + 3;
            } else if rest.starts_with("<!") {
                let start = self.pos;
                let len = rest.find('>').ok_or(TemplateError::UnterminatedTag(start))?;
                self.pos += len + 1;
            } else if rest.starts_with("</") && rest[2..].starts_with(is_tag_start) {
                self.parse_close_tag()?;
            } else if c == '<' && rest[1..].starts_with(is_tag_start) {
                self.parse_open_tag()?;
            } else {
                self.advance();
            }
        }
        while let Some(node) = self.stack.pop() {
            self.attach(node);
        }
        Ok(())
    }

    fn skip_interpolation(&mut self) {
        match self.rest()[2..].find("}}") {
            Some(len) => self.pos += 2 + len + 2,
            // Literal `{{` with no close is plain text.
            None => self.pos += 2,
        }
    }

    fn attach(&mut self, node: TemplateNode) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn read_name(&mut self) -> &'src str {
        let start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| !c.is_whitespace() && c != '/' && c != '>')
        {
            self.advance();
        }
        &self.source[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn parse_close_tag(&mut self) -> Result<(), TemplateError> {
        let start = self.pos;
        self.pos += 2;
        let name = self.read_name();
        let len = self
            .rest()
            .find('>')
            .ok_or(TemplateError::UnterminatedTag(start))?;
        self.pos += len + 1;

        // Stray close tags are ignored; otherwise close everything above the match.
        if let Some(index) = self.stack.iter().rposition(|node| node.tag == name) {
            while self.stack.len() > index {
                if let Some(node) = self.stack.pop() {
                    self.attach(node);
                }
            }
        }
        Ok(())
    }

    fn parse_open_tag(&mut self) -> Result<(), TemplateError> {
        let start = self.pos;
        self.pos += 1;
        let mut node = TemplateNode {
            tag: self.read_name().to_string(),
            ..TemplateNode::default()
        };

        let self_closing = loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(TemplateError::UnterminatedTag(start));
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                break true;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break false;
            }
            if rest.starts_with('/') {
                self.pos += 1;
                continue;
            }
            let (name, value) = self.parse_attribute()?;
            node.attributes.insert(name, value);
        };

        if self_closing || VOID_ELEMENTS.contains(&node.tag.as_str()) {
            self.attach(node);
        } else if RAW_TEXT_ELEMENTS.contains(&node.tag.as_str()) {
            let needle = format!("</{}", node.tag);
            let len = self
                .rest()
                .find(&needle)
                .ok_or(TemplateError::UnterminatedTag(start))?;
            self.pos += len;
            let close = self
                .rest()
                .find('>')
                .ok_or(TemplateError::UnterminatedTag(start))?;
            self.pos += close + 1;
            self.attach(node);
        } else {
            self.stack.push(node);
        }
        Ok(())
    }

    fn parse_attribute(&mut self) -> Result<(String, String), TemplateError> {
        let start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/')
        {
            self.advance();
        }
        // A lone `=` still consumes one character so the loop makes progress.
        if self.pos == start {
            self.advance();
        }
        let name = self.source[start..self.pos].to_string();

        self.skip_whitespace();
        if self.peek_char() != Some('=') {
            return Ok((name, String::new()));
        }
        self.advance();
        self.skip_whitespace();

        let value = match self.peek_char() {
            Some(quote @ ('"' | '\'')) => {
                let value_start = self.pos;
                self.advance();
                let len = self
                    .rest()
                    .find(quote)
                    .ok_or(TemplateError::UnterminatedAttribute(value_start))?;
                let value = &self.source[self.pos..self.pos + len];
                self.pos += len + 1;
                value
            }
            _ => {
                let value_start = self.pos;
                while self
                    .peek_char()
                    .is_some_and(|c| !c.is_whitespace() && c != '>')
                {
                    self.advance();
                }
                &self.source[value_start..self.pos]
            }
        };
        Ok((name, decode_entities(value)))
    }
}

fn entity_regex() -> &'static Regex {
    static ENTITY: OnceLock<Regex> = OnceLock::new();
    ENTITY.get_or_init(|| {
        Regex::new(r"&(?:lt|gt|quot|amp|#39|#10|#9);").expect("regex for attribute entities")
    })
}

/// Decode the entities markup serializers emit in attribute values, in one pass.
fn decode_entities(value: &str) -> String {
    entity_regex()
        .replace_all(value, |caps: &Captures<'_>| match &caps[0] {
            "&lt;" => "<",
            "&gt;" => ">",
            "&quot;" => "\"",
            "&amp;" => "&",
            "&#39;" => "'",
            "&#10;" => "\n",
            _ => "\t",
        })
        .into_owned()
}

fn is_tag_start(c: char) -> bool {
    c.is_alphabetic()
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
