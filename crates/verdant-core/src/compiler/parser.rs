//! Markup parser shared by the template compiler and the in-memory document.
//!
//! Accepts a forgiving HTML subset: elements, quoted/unquoted/bare
//! attributes, void and self-closing elements, text. Comments and `<!...>`
//! declarations are skipped, whitespace-only text is dropped and the basic
//! entities are decoded.
use crate::compiler::error::TemplateSyntaxError;
use crate::vdom::{decode_entities, is_void_element};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: String,
    pub attrs: Vec<Attr>,
    pub children: Vec<Node>,
    /// Byte offset of the opening `<`
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextNode {
    pub content: String,
    pub position: usize,
}

impl Node {
    pub fn position(&self) -> usize {
        match self {
            Node::Element(el) => el.position,
            Node::Text(text) => text.position,
        }
    }
}

/// Parse markup into a list of top-level nodes
pub fn parse_fragment(markup: &str) -> Result<Vec<Node>, TemplateSyntaxError> {
    Parser {
        src: markup,
        pos: 0,
        stack: Vec::new(),
        roots: Vec::new(),
    }
    .run()
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    stack: Vec<ElementNode>,
    roots: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn run(mut self) -> Result<Vec<Node>, TemplateSyntaxError> {
        while self.pos < self.src.len() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.skip_past("-->", "unterminated comment")?;
            } else if rest.starts_with("<!") {
                self.skip_past(">", "unterminated declaration")?;
            } else if rest.starts_with("</") {
                self.parse_close_tag()?;
            } else if self.at_tag_start() {
                self.parse_open_tag()?;
            } else {
                self.parse_text();
            }
        }

        if let Some(open) = self.stack.pop() {
            return Err(self.error(open.position, format!("unclosed element <{}>", open.tag)));
        }
        Ok(self.roots)
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn error(&self, position: usize, message: impl Into<String>) -> TemplateSyntaxError {
        TemplateSyntaxError::new(self.src, position, message)
    }

    fn at_tag_start(&self) -> bool {
        let mut chars = self.rest().chars();
        chars.next() == Some('<') && chars.next().is_some_and(|c| c.is_ascii_alphabetic())
    }

    fn skip_past(&mut self, terminator: &str, message: &str) -> Result<(), TemplateSyntaxError> {
        match self.rest().find(terminator) {
            Some(offset) => {
                self.pos += offset + terminator.len();
                Ok(())
            }
            None => Err(self.error(self.pos, message)),
        }
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn read_while(&mut self, accept: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        let len = self
            .rest()
            .char_indices()
            .find(|(_, c)| !accept(*c))
            .map_or(self.rest().len(), |(i, _)| i);
        self.pos += len;
        &self.src[start..self.pos]
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn parse_text(&mut self) {
        let start = self.pos;
        // A '<' that does not start a tag, comment or closing tag is text.
        let mut end = self.src.len();
        for (offset, c) in self.rest().char_indices().skip(1) {
            if c == '<' {
                let tail = &self.src[start + offset..];
                let next = tail[1..].chars().next();
                if next.is_some_and(|n| n.is_ascii_alphabetic() || n == '/' || n == '!') {
                    end = start + offset;
                    break;
                }
            }
        }
        self.pos = end;
        let raw = &self.src[start..end];
        if !raw.trim().is_empty() {
            self.push_node(Node::Text(TextNode {
                content: decode_entities(raw),
                position: start,
            }));
        }
    }

    fn parse_open_tag(&mut self) -> Result<(), TemplateSyntaxError> {
        let start = self.pos;
        self.pos += 1; // '<'
        let tag = self
            .read_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
            .to_string();

        let mut attrs = Vec::new();
        let self_closing = loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(self.error(start, format!("unterminated tag <{}>", tag)));
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                break true;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break false;
            }
            attrs.push(self.parse_attr()?);
        };

        let element = ElementNode {
            tag,
            attrs,
            children: Vec::new(),
            position: start,
        };
        if self_closing || is_void_element(&element.tag) {
            self.push_node(Node::Element(element));
        } else {
            self.stack.push(element);
        }
        Ok(())
    }

    fn parse_attr(&mut self) -> Result<Attr, TemplateSyntaxError> {
        let position = self.pos;
        let name = self
            .read_while(|c| !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\''))
            .to_string();
        if name.is_empty() {
            let found = self.peek().unwrap_or(' ');
            return Err(self.error(position, format!("unexpected '{}' in tag", found)));
        }

        self.skip_whitespace();
        if self.peek() != Some('=') {
            return Ok(Attr {
                name,
                value: String::new(),
                position,
            });
        }
        self.pos += 1; // '='
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let quote_pos = self.pos;
                self.pos += 1;
                let body = self.rest();
                match body.find(quote) {
                    Some(len) => {
                        let value = &body[..len];
                        self.pos += len + 1;
                        value
                    }
                    None => {
                        return Err(self.error(
                            quote_pos,
                            format!("unterminated value for attribute '{}'", name),
                        ));
                    }
                }
            }
            _ => {
                let value = self.read_while(|c| !c.is_whitespace() && c != '>');
                if value.is_empty() {
                    return Err(self.error(
                        self.pos,
                        format!("missing value for attribute '{}'", name),
                    ));
                }
                value
            }
        };

        Ok(Attr {
            name,
            value: decode_entities(value),
            position,
        })
    }

    fn parse_close_tag(&mut self) -> Result<(), TemplateSyntaxError> {
        let start = self.pos;
        self.pos += 2; // '</'
        let name = self
            .read_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
            .to_string();
        self.skip_whitespace();
        if self.peek() != Some('>') {
            return Err(self.error(start, format!("unterminated closing tag </{}", name)));
        }
        self.pos += 1;

        match self.stack.pop() {
            Some(open) if open.tag.eq_ignore_ascii_case(&name) => {
                self.push_node(Node::Element(open));
                Ok(())
            }
            Some(open) => Err(self.error(
                start,
                format!("expected </{}> but found </{}>", open.tag, name),
            )),
            None => Err(self.error(start, format!("unexpected closing tag </{}>", name))),
        }
    }
}
