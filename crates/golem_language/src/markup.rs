//! Tolerant XML-fragment parsing for templates and AIML documents.
//!
//! Templates are well-formed XML fragments, but the dialect is forgiving:
//!
//! - Element and self-closing forms are interchangeable (`<that/>`,
//!   `<that></that>`).
//! - Comments and processing instructions are kept verbatim as [`Node::Raw`]
//!   so they pass through evaluation untouched.
//! - A stray `<` that does not open a tag, comment, or PI is ordinary text.
//! - The five standard entities are decoded in text and attribute values.
//!
//! Mismatched or unclosed elements are real errors ([`MarkupError`]) - those
//! indicate a broken knowledge file and reject the category at load time.
//!
//! [`serialize`] regenerates markup from a node list. The evaluator uses it
//! for unknown-tag passthrough and for rebuilding `<learn>` bodies.

use crate::error::MarkupError;

/// One node of a parsed markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Character data, entities decoded.
    Text(String),
    /// A comment or processing instruction, byte-for-byte as written.
    Raw(String),
    /// An element with attributes and children.
    Element(Element),
}

/// A markup element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements, skipping text and raw nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First child element with the given name.
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// The concatenated text content of this element's subtree.
    pub fn text_content(&self) -> String {
        fn collect(nodes: &[Node], out: &mut String) {
            for node in nodes {
                match node {
                    Node::Text(t) => out.push_str(t),
                    Node::Raw(_) => {}
                    Node::Element(el) => collect(&el.children, out),
                }
            }
        }
        let mut out = String::new();
        collect(&self.children, &mut out);
        out
    }
}

/// Parse a markup fragment into a node list.
pub fn parse_fragment(input: &str) -> Result<Vec<Node>, MarkupError> {
    let mut parser = Parser {
        chars: input.chars().collect(),
        pos: 0,
    };
    let nodes = parser.parse_nodes(None)?;
    Ok(nodes)
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn parse_nodes(&mut self, enclosing: Option<&str>) -> Result<Vec<Node>, MarkupError> {
        let mut nodes: Vec<Node> = Vec::new();
        let mut text = String::new();

        macro_rules! flush_text {
            () => {
                if !text.is_empty() {
                    nodes.push(Node::Text(std::mem::take(&mut text)));
                }
            };
        }

        loop {
            let Some(ch) = self.peek(0) else {
                if let Some(name) = enclosing {
                    return Err(MarkupError::new(
                        format!("unclosed element <{}>", name),
                        self.pos,
                    ));
                }
                flush_text!();
                return Ok(nodes);
            };

            if ch != '<' {
                if ch == '&' {
                    text.push_str(&self.consume_entity());
                } else {
                    text.push(ch);
                    self.pos += 1;
                }
                continue;
            }

            // Dispatch on what follows '<'.
            if self.lookahead("<!--") {
                flush_text!();
                nodes.push(Node::Raw(self.consume_until("-->")));
                continue;
            }
            if self.lookahead("<?") {
                flush_text!();
                nodes.push(Node::Raw(self.consume_until("?>")));
                continue;
            }
            if self.lookahead("</") {
                let close_pos = self.pos;
                self.pos += 2;
                let name = self.consume_name();
                self.skip_whitespace();
                if self.peek(0) != Some('>') {
                    return Err(MarkupError::new("malformed close tag", close_pos));
                }
                self.pos += 1;
                return match enclosing {
                    Some(expected) if expected == name => {
                        flush_text!();
                        Ok(nodes)
                    }
                    Some(expected) => Err(MarkupError::new(
                        format!("expected </{}>, found </{}>", expected, name),
                        close_pos,
                    )),
                    None => Err(MarkupError::new(
                        format!("unexpected close tag </{}>", name),
                        close_pos,
                    )),
                };
            }
            if self
                .peek(1)
                .map(|c| c.is_ascii_alphabetic())
                .unwrap_or(false)
            {
                flush_text!();
                nodes.push(self.parse_element()?);
                continue;
            }

            // A lone '<' is ordinary text.
            text.push('<');
            self.pos += 1;
        }
    }

    fn parse_element(&mut self) -> Result<Node, MarkupError> {
        let open_pos = self.pos;
        self.pos += 1; // '<'
        let name = self.consume_name();
        let mut attrs = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek(0) {
                Some('/') => {
                    if self.peek(1) == Some('>') {
                        self.pos += 2;
                        return Ok(Node::Element(Element {
                            name,
                            attrs,
                            children: Vec::new(),
                        }));
                    }
                    return Err(MarkupError::new("malformed tag", open_pos));
                }
                Some('>') => {
                    self.pos += 1;
                    let children = self.parse_nodes(Some(&name))?;
                    return Ok(Node::Element(Element {
                        name,
                        attrs,
                        children,
                    }));
                }
                Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                    attrs.push(self.parse_attr(open_pos)?);
                }
                _ => return Err(MarkupError::new(format!("malformed tag <{}>", name), open_pos)),
            }
        }
    }

    fn parse_attr(&mut self, open_pos: usize) -> Result<(String, String), MarkupError> {
        let name = self.consume_name();
        self.skip_whitespace();
        if self.peek(0) != Some('=') {
            return Err(MarkupError::new(
                format!("attribute '{}' is missing a value", name),
                open_pos,
            ));
        }
        self.pos += 1;
        self.skip_whitespace();
        let quote = match self.peek(0) {
            Some(q @ ('"' | '\'')) => q,
            _ => {
                return Err(MarkupError::new(
                    format!("attribute '{}' value is not quoted", name),
                    open_pos,
                ))
            }
        };
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek(0) {
                Some(c) if c == quote => {
                    self.pos += 1;
                    return Ok((name, decode_entities(&value)));
                }
                Some('&') => value.push_str(&self.consume_entity()),
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
                None => {
                    return Err(MarkupError::new(
                        format!("unterminated value for attribute '{}'", name),
                        open_pos,
                    ))
                }
            }
        }
    }

    fn consume_name(&mut self) -> String {
        let mut name = String::new();
        while let Some(c) = self.peek(0) {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.') {
                name.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        name
    }

    /// Consume one entity reference; unknown references stay verbatim.
    fn consume_entity(&mut self) -> String {
        for (entity, ch) in ENTITIES {
            if self.lookahead(entity) {
                self.pos += entity.chars().count();
                return ch.to_string();
            }
        }
        self.pos += 1;
        "&".to_string()
    }

    /// Consume through `terminator` (inclusive), or to end of input.
    fn consume_until(&mut self, terminator: &str) -> String {
        let start = self.pos;
        let term: Vec<char> = terminator.chars().collect();
        while self.pos < self.chars.len() {
            if self.chars[self.pos..].starts_with(&term[..]) {
                self.pos += term.len();
                break;
            }
            self.pos += 1;
        }
        self.chars[start..self.pos].iter().collect()
    }

    fn skip_whitespace(&mut self) {
        while self.peek(0).map(char::is_whitespace).unwrap_or(false) {
            self.pos += 1;
        }
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn lookahead(&self, prefix: &str) -> bool {
        let p: Vec<char> = prefix.chars().collect();
        self.chars[self.pos.min(self.chars.len())..].starts_with(&p[..])
    }
}

const ENTITIES: &[(&str, char)] = &[
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&amp;", '&'),
    ("&quot;", '"'),
    ("&apos;", '\''),
];

fn decode_entities(text: &str) -> String {
    let mut out = text.to_string();
    for (entity, ch) in ENTITIES {
        out = out.replace(entity, &ch.to_string());
    }
    out
}

/// Escape character data for re-serialization.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

fn escape_attr(text: &str) -> String {
    escape_text(text).replace('"', "&quot;")
}

/// Regenerate markup for a node list.
pub fn serialize(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        serialize_node(node, &mut out);
    }
    out
}

/// Regenerate markup for a single node.
pub fn serialize_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(t) => out.push_str(&escape_text(t)),
        Node::Raw(r) => out.push_str(r),
        Node::Element(el) => {
            out.push('<');
            out.push_str(&el.name);
            for (k, v) in &el.attrs {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&escape_attr(v));
                out.push('"');
            }
            if el.children.is_empty() {
                out.push_str("/>");
            } else {
                out.push('>');
                for child in &el.children {
                    serialize_node(child, out);
                }
                out.push_str("</");
                out.push_str(&el.name);
                out.push('>');
            }
        }
    }
}
