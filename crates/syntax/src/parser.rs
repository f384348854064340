//! Recursive-descent parser for `.mq` component files.
//!
//! Parsing is pure: one source string in, one [`Component`] out, or a
//! [`ParseError`] naming the offending construct and its location. Embedded
//! expressions are captured by balanced-delimiter scanning and handed to the
//! `nom` expression parser.

use crate::ast::{
    AttrValue, Attribute, Component, ControlBlock, ControlKind, DeclKind, Declaration, ElementNode,
    ExpressionNode, Node,
};
use crate::error::{Location, ParseError};
use crate::expr::Expr;
use crate::expr_parser::parse_expression;
use marq_types::RenderMode;

/// Parses one component source file.
pub fn parse_component(source: &str) -> Result<Component, ParseError> {
    let mut parser = SourceParser::new(source);
    let component = parser.component()?;
    log::debug!(
        "parsed component '{}' ({} declarations)",
        component.name,
        component.declarations.len()
    );
    Ok(component)
}

struct SourceParser {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    col: usize,
}

impl SourceParser {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    // --- Cursor primitives ---

    fn location(&self) -> Location {
        Location {
            line: self.line,
            col: self.col,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    fn starts_with(&self, s: &str) -> bool {
        s.chars()
            .enumerate()
            .all(|(i, c)| self.chars.get(self.pos + i) == Some(&c))
    }

    fn eat(&mut self, s: &str) -> bool {
        if self.starts_with(s) {
            for _ in 0..s.chars().count() {
                self.bump();
            }
            true
        } else {
            false
        }
    }

    fn expect(&mut self, s: &str, context: &str) -> Result<(), ParseError> {
        if self.eat(s) {
            Ok(())
        } else {
            Err(self.syntax(format!("expected '{}' {}", s, context)))
        }
    }

    /// Like [`expect`](Self::expect) for keywords: the match must end at an
    /// identifier boundary, so `componentX` never reads as `component X`.
    fn keyword(&mut self, word: &str, context: &str) -> Result<(), ParseError> {
        let after = self.chars.get(self.pos + word.chars().count()).copied();
        let bounded = !after.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_');
        if bounded && self.starts_with(word) {
            self.eat(word);
            Ok(())
        } else {
            Err(self.syntax(format!("expected '{}' {}", word, context)))
        }
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|c| c.is_whitespace()) {
            self.bump();
        }
    }

    fn syntax(&self, message: impl Into<String>) -> ParseError {
        ParseError::Syntax {
            message: message.into(),
            location: self.location(),
        }
    }

    fn unsupported(&self, construct: impl Into<String>, location: Location) -> ParseError {
        ParseError::Unsupported {
            construct: construct.into(),
            location,
        }
    }

    fn ident(&mut self, context: &str) -> Result<String, ParseError> {
        let start_ok = self
            .peek()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !start_ok {
            return Err(self.syntax(format!("expected identifier {}", context)));
        }
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                name.push(c);
                self.bump();
            } else {
                break;
            }
        }
        Ok(name)
    }

    /// Consumes a balanced `{...}` / `(...)` region starting at the opening
    /// delimiter and returns the inner text. Respects nested delimiters and
    /// quoted strings.
    fn scan_balanced(&mut self, open: char, close: char) -> Result<String, ParseError> {
        let start = self.location();
        if self.peek() != Some(open) {
            return Err(self.syntax(format!("expected '{}'", open)));
        }
        self.bump();
        let mut depth = 1usize;
        let mut inner = String::new();
        let mut quote: Option<char> = None;
        while let Some(c) = self.bump() {
            match quote {
                Some(q) => {
                    if c == q {
                        quote = None;
                    }
                }
                None => {
                    if c == '\'' || c == '"' {
                        quote = Some(c);
                    } else if c == open {
                        depth += 1;
                    } else if c == close {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(inner);
                        }
                    }
                }
            }
            inner.push(c);
        }
        Err(ParseError::Syntax {
            message: format!("unterminated '{}...{}' region", open, close),
            location: start,
        })
    }

    /// Consumes a quoted literal starting at the opening quote and returns
    /// the inner text.
    fn scan_quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.location();
        if self.peek() != Some(quote) {
            return Err(self.syntax(format!("expected '{}'", quote)));
        }
        self.bump();
        let mut inner = String::new();
        while let Some(c) = self.bump() {
            if c == quote {
                return Ok(inner);
            }
            inner.push(c);
        }
        Err(ParseError::Syntax {
            message: "unterminated string literal".to_string(),
            location: start,
        })
    }

    fn parse_expr_at(&self, text: &str, location: Location) -> Result<Expr, ParseError> {
        parse_expression(text).map_err(|e| ParseError::Expression {
            expr: text.trim().to_string(),
            message: e.message,
            location,
        })
    }

    // --- Grammar ---

    fn component(&mut self) -> Result<Component, ParseError> {
        self.skip_ws();
        let mode = self.directive()?;

        self.skip_ws();
        self.keyword("component", "to open a component definition")?;
        self.skip_ws();
        let name = self.ident("after 'component'")?;

        self.skip_ws();
        self.expect("(", "to open the parameter list")?;
        let params = self.param_list()?;

        self.skip_ws();
        self.expect("{", "to open the component body")?;

        let mut declarations = Vec::new();
        loop {
            self.skip_ws();
            if self.starts_with("let ") || self.starts_with("let\t") {
                declarations.push(self.declaration()?);
            } else {
                break;
            }
        }

        self.skip_ws();
        let root = match self.peek() {
            Some('<') | Some('{') => self.node()?,
            _ => return Err(self.syntax("expected a root markup node")),
        };

        self.skip_ws();
        self.expect("}", "to close the component body")?;
        self.skip_ws();
        if self.peek().is_some() {
            return Err(self.syntax("unexpected input after component definition"));
        }

        Ok(Component {
            name,
            params,
            declarations,
            root,
            mode,
        })
    }

    fn directive(&mut self) -> Result<RenderMode, ParseError> {
        if self.peek() != Some('"') {
            return Ok(RenderMode::Client);
        }
        let location = self.location();
        let literal = self.scan_quoted('"')?;
        self.skip_ws();
        self.expect(";", "after the file directive")?;
        match literal.as_str() {
            "use client" => Ok(RenderMode::Client),
            "use server" => Ok(RenderMode::ServerOnly),
            other => Err(ParseError::Syntax {
                message: format!("unknown file directive \"{}\"", other),
                location,
            }),
        }
    }

    fn param_list(&mut self) -> Result<Vec<String>, ParseError> {
        let mut params = Vec::new();
        self.skip_ws();
        if self.eat(")") {
            return Ok(params);
        }
        loop {
            self.skip_ws();
            params.push(self.ident("in the parameter list")?);
            self.skip_ws();
            if self.eat(")") {
                return Ok(params);
            }
            self.expect(",", "between parameters")?;
        }
    }

    fn declaration(&mut self) -> Result<Declaration, ParseError> {
        let location = self.location();
        self.keyword("let", "to open a declaration")?;
        self.skip_ws();
        let name = self.ident("after 'let'")?;
        self.skip_ws();
        self.expect("=", "in the declaration")?;
        self.skip_ws();

        let ctor_loc = self.location();
        let ctor = self.ident("naming a reactive constructor")?;
        let kind = match ctor.as_str() {
            "signal" => DeclKind::Signal,
            "derived" => DeclKind::Derived,
            other => {
                return Err(ParseError::Syntax {
                    message: format!(
                        "expected 'signal(...)' or 'derived(...)', found '{}'",
                        other
                    ),
                    location: ctor_loc,
                });
            }
        };

        self.skip_ws();
        let init_loc = self.location();
        let inner = self.scan_balanced('(', ')')?;
        let init = self.parse_expr_at(&inner, init_loc)?;

        self.skip_ws();
        self.expect(";", "after the declaration")?;

        Ok(Declaration {
            name,
            kind,
            init,
            location: Some(location),
        })
    }

    fn node(&mut self) -> Result<Node, ParseError> {
        let location = self.location();
        if self.starts_with("<>") {
            return self.fragment();
        }
        if self.starts_with("<{") {
            return Err(self.unsupported("dynamic tag name", location));
        }
        if self.peek() == Some('<') {
            return self.element().map(Node::Element);
        }
        if self.starts_with("{#if") {
            return self.if_block();
        }
        if self.starts_with("{#for") {
            return self.for_block();
        }
        if self.peek() == Some('{') {
            return self.interpolation();
        }
        Err(self.syntax("expected a markup node"))
    }

    fn fragment(&mut self) -> Result<Node, ParseError> {
        self.expect("<>", "to open a fragment")?;
        let children = self.children()?;
        self.expect("</>", "to close the fragment")?;
        Ok(Node::Fragment(children))
    }

    fn interpolation(&mut self) -> Result<Node, ParseError> {
        let location = self.location();
        let inner = self.scan_balanced('{', '}')?;
        if inner.trim_start().starts_with("...") {
            return Err(self.unsupported("spread expression", location));
        }
        let expr = self.parse_expr_at(&inner, location)?;
        Ok(Node::Expression(ExpressionNode {
            expr,
            location: Some(location),
        }))
    }

    fn if_block(&mut self) -> Result<Node, ParseError> {
        let location = self.location();
        self.expect("{#if", "to open a conditional block")?;
        // Re-scan from the head: capture the remainder of the `{...}` tag.
        let condition_text = self.control_head()?;
        let condition = self.parse_expr_at(&condition_text, location)?;

        let then_branch = self.children()?;
        let else_branch = if self.eat("{#else}") {
            self.children()?
        } else {
            Vec::new()
        };
        self.expect("{/if}", "to close the conditional block")?;

        Ok(Node::ControlBlock(ControlBlock {
            kind: ControlKind::If {
                condition,
                then_branch,
                else_branch,
            },
            location: Some(location),
        }))
    }

    fn for_block(&mut self) -> Result<Node, ParseError> {
        let location = self.location();
        self.expect("{#for", "to open an iteration block")?;
        let head = self.control_head()?;

        let (item, source, key) = self.parse_for_head(&head, location)?;
        let body = self.children()?;
        self.expect("{/for}", "to close the iteration block")?;

        Ok(Node::ControlBlock(ControlBlock {
            kind: ControlKind::Each {
                item,
                source,
                key,
                body,
            },
            location: Some(location),
        }))
    }

    /// Consumes the rest of a `{#if ...}` / `{#for ...}` head up to the
    /// closing brace and returns the inner text.
    fn control_head(&mut self) -> Result<String, ParseError> {
        let start = self.location();
        let mut depth = 1usize;
        let mut inner = String::new();
        let mut quote: Option<char> = None;
        while let Some(c) = self.bump() {
            match quote {
                Some(q) => {
                    if c == q {
                        quote = None;
                    }
                }
                None => {
                    if c == '\'' || c == '"' {
                        quote = Some(c);
                    } else if c == '{' {
                        depth += 1;
                    } else if c == '}' {
                        depth -= 1;
                        if depth == 0 {
                            return Ok(inner);
                        }
                    }
                }
            }
            inner.push(c);
        }
        Err(ParseError::Syntax {
            message: "unterminated control block head".to_string(),
            location: start,
        })
    }

    /// `item in source key key_expr` — the key clause is mandatory.
    fn parse_for_head(
        &self,
        head: &str,
        location: Location,
    ) -> Result<(String, Expr, Expr), ParseError> {
        let head = head.trim();
        let Some((item, rest)) = head.split_once(" in ") else {
            return Err(ParseError::Syntax {
                message: "expected 'item in source' in iteration head".to_string(),
                location,
            });
        };
        let item = item.trim().to_string();
        if item.is_empty() || !item.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ParseError::Syntax {
                message: format!("invalid iteration variable '{}'", item),
                location,
            });
        }

        let Some((source_text, key_text)) = split_key_clause(rest) else {
            return Err(keyless_error(location));
        };

        let source = self.parse_expr_at(source_text, location)?;
        let key = self.parse_expr_at(key_text, location)?;
        Ok((item, source, key))
    }

    fn children(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            match self.peek() {
                None => return Ok(nodes),
                Some('<') if self.starts_with("</") => return Ok(nodes),
                Some('{')
                    if self.starts_with("{/")
                        || self.starts_with("{#else}") =>
                {
                    return Ok(nodes);
                }
                Some('<') | Some('{') => nodes.push(self.node()?),
                Some(_) => {
                    if let Some(text) = self.text()? {
                        nodes.push(Node::Text(text));
                    }
                }
            }
        }
    }

    /// Collects literal text up to the next markup delimiter. Whitespace-only
    /// runs that span a line break are formatting, not content, and are
    /// dropped. A bare `}` has no meaning in element content and is rejected
    /// rather than skipped, which also keeps [`children`](Self::children)
    /// from spinning on an unconsumed character.
    fn text(&mut self) -> Result<Option<String>, ParseError> {
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c == '<' || c == '{' {
                break;
            }
            if c == '}' {
                return Err(self.syntax("unexpected '}' in element content"));
            }
            text.push(c);
            self.bump();
        }
        if text.chars().all(char::is_whitespace) && text.contains('\n') {
            return Ok(None);
        }
        Ok(Some(text))
    }

    fn element(&mut self) -> Result<ElementNode, ParseError> {
        let location = self.location();
        self.expect("<", "to open an element")?;
        let tag = self.ident("as an element tag name")?;

        let mut attributes = Vec::new();
        loop {
            self.skip_ws();
            if self.eat("/>") {
                return Ok(ElementNode {
                    tag,
                    attributes,
                    children: Vec::new(),
                    location: Some(location),
                });
            }
            if self.eat(">") {
                break;
            }
            attributes.push(self.attribute()?);
        }

        let children = self.children()?;

        self.expect("</", &format!("to close <{}>", tag))?;
        let close_loc = self.location();
        let close_tag = self.ident("in the closing tag")?;
        if close_tag != tag {
            return Err(ParseError::Syntax {
                message: format!("mismatched closing tag: expected </{}>, found </{}>", tag, close_tag),
                location: close_loc,
            });
        }
        self.skip_ws();
        self.expect(">", "to finish the closing tag")?;

        Ok(ElementNode {
            tag,
            attributes,
            children,
            location: Some(location),
        })
    }

    fn attribute(&mut self) -> Result<Attribute, ParseError> {
        let location = self.location();
        if self.peek() == Some('{') {
            let inner = self.scan_balanced('{', '}')?;
            if inner.trim_start().starts_with("...") {
                return Err(self.unsupported("attribute spread", location));
            }
            return Err(ParseError::Syntax {
                message: "expected an attribute name".to_string(),
                location,
            });
        }

        let mut name = self.ident("as an attribute name")?;
        // Attribute names may contain hyphens (`data-testid`).
        while self.peek() == Some('-') {
            name.push('-');
            self.bump();
            name.push_str(&self.ident("after '-' in attribute name")?);
        }

        if !self.eat("=") {
            return Ok(Attribute {
                name,
                value: AttrValue::Static(String::new()),
                location: Some(location),
            });
        }

        let value = match self.peek() {
            Some('"') => AttrValue::Static(self.scan_quoted('"')?),
            Some('\'') => AttrValue::Static(self.scan_quoted('\'')?),
            Some('{') => {
                let expr_loc = self.location();
                let inner = self.scan_balanced('{', '}')?;
                if inner.trim_start().starts_with("...") {
                    return Err(self.unsupported("attribute spread", expr_loc));
                }
                AttrValue::Dynamic(self.parse_expr_at(&inner, expr_loc)?)
            }
            _ => return Err(self.syntax("expected an attribute value")),
        };

        Ok(Attribute {
            name,
            value,
            location: Some(location),
        })
    }
}

/// Splits `source key key_expr` at the last top-level ` key ` separator.
fn split_key_clause(rest: &str) -> Option<(&str, &str)> {
    let bytes = rest.as_bytes();
    let mut depth = 0i32;
    let mut quote: Option<u8> = None;
    let needle = b" key ";
    let mut found = None;
    for i in 0..bytes.len() {
        let c = bytes[i];
        match quote {
            Some(q) => {
                if c == q {
                    quote = None;
                }
            }
            None => match c {
                b'\'' | b'"' => quote = Some(c),
                b'(' | b'[' => depth += 1,
                b')' | b']' => depth -= 1,
                _ => {
                    if depth == 0 && bytes[i..].starts_with(needle) {
                        found = Some(i);
                    }
                }
            },
        }
    }
    found.map(|i| (&rest[..i], &rest[i + needle.len()..]))
}

fn keyless_error(location: Location) -> ParseError {
    ParseError::Unsupported {
        construct: "list rendering without an explicit per-item key".to_string(),
        location,
    }
}
