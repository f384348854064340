//! The component AST produced by the source parser.

use crate::error::Location;
use crate::expr::Expr;
use marq_types::RenderMode;
use serde::{Deserialize, Serialize};

/// One parsed component: name, ordered props, reactive declarations, and the
/// root markup node. Immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub name: String,
    pub params: Vec<String>,
    pub declarations: Vec<Declaration>,
    pub root: Node,
    pub mode: RenderMode,
}

/// The constructor used at a reactive declaration site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclKind {
    Signal,
    Derived,
}

/// `let name = signal(init);` or `let name = derived(expr);`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,
    pub kind: DeclKind,
    pub init: Expr,
    #[serde(skip)]
    pub location: Option<Location>,
}

/// Markup tree. Ownership is strictly hierarchical: a child never outlives
/// its parent, and nodes are never shared.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Node {
    Element(ElementNode),
    Text(String),
    Expression(ExpressionNode),
    Fragment(Vec<Node>),
    ControlBlock(ControlBlock),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementNode {
    pub tag: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    #[serde(skip)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressionNode {
    pub expr: Expr,
    #[serde(skip)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
    #[serde(skip)]
    pub location: Option<Location>,
}

impl Attribute {
    /// Event handlers are recognized by the `onXxx` naming convention:
    /// `on` followed by an uppercase letter.
    pub fn is_event(&self) -> bool {
        let mut chars = self.name.chars();
        chars.next() == Some('o')
            && chars.next() == Some('n')
            && chars.next().is_some_and(|c| c.is_ascii_uppercase())
    }

    /// The DOM event name for an event attribute (`onClick` -> `click`).
    pub fn event_name(&self) -> Option<String> {
        if self.is_event() {
            Some(self.name[2..].to_ascii_lowercase())
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AttrValue {
    Static(String),
    Dynamic(Expr),
}

/// Conditional or iteration region. The whole block is one replaceable unit;
/// its children are never decomposed into individual slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlBlock {
    pub kind: ControlKind,
    #[serde(skip)]
    pub location: Option<Location>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ControlKind {
    If {
        condition: Expr,
        then_branch: Vec<Node>,
        else_branch: Vec<Node>,
    },
    Each {
        item: String,
        source: Expr,
        /// Per-item key expression; required for stable identity inside lists.
        key: Expr,
        body: Vec<Node>,
    },
}

impl ControlBlock {
    /// The expression governing re-evaluation of the whole region.
    pub fn governing_expr(&self) -> &Expr {
        match &self.kind {
            ControlKind::If { condition, .. } => condition,
            ControlKind::Each { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attr(name: &str) -> Attribute {
        Attribute {
            name: name.to_string(),
            value: AttrValue::Static(String::new()),
            location: None,
        }
    }

    #[test]
    fn test_event_attribute_convention() {
        assert!(attr("onClick").is_event());
        assert!(attr("onInput").is_event());
        assert!(!attr("onclick").is_event());
        assert!(!attr("one").is_event());
        assert!(!attr("class").is_event());
    }

    #[test]
    fn test_event_name_lowering() {
        assert_eq!(attr("onClick").event_name().as_deref(), Some("click"));
        assert_eq!(attr("class").event_name(), None);
    }
}
