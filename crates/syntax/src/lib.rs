//! Source parser for marq component files.
//!
//! Turns one `.mq` source string into a [`Component`] AST: elements, text,
//! embedded expressions, fragments, attributes, event bindings, and control
//! blocks (conditionals and keyed iteration). Parsing is pure and reports
//! errors with source locations.

pub mod ast;
pub mod error;
pub mod expr;
pub mod expr_parser;
pub mod parser;

pub use ast::{
    AttrValue, Attribute, Component, ControlBlock, ControlKind, DeclKind, Declaration, ElementNode,
    ExpressionNode, Node,
};
pub use error::{Location, ParseError};
pub use expr::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use expr_parser::parse_expression;
pub use parser::parse_component;
