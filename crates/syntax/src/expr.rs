//! The embedded expression language.
//!
//! Expressions appear in interpolations, dynamic attribute values, event
//! handlers, declaration initializers, and control-block heads. The verbatim
//! source text is retained on every [`Expr`] because binding descriptors and
//! backend emissions reproduce it unchanged; the parsed [`ExprKind`] tree is
//! what dependency analysis walks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A parsed expression plus its verbatim source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub raw: String,
    pub kind: ExprKind,
}

impl Expr {
    /// The set of free identifier roots this expression reads.
    ///
    /// Member accesses contribute only their root (`items.length` reads
    /// `items`); call arguments and callees are walked; literals contribute
    /// nothing.
    pub fn free_idents(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.kind.collect_idents(&mut out);
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// Expression tree. Nested nodes do not carry raw text; only the enclosing
/// [`Expr`] does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExprKind {
    Ident(String),
    Member {
        object: Box<ExprKind>,
        property: String,
    },
    Number(f64),
    Str(String),
    Bool(bool),
    Unary {
        op: UnaryOp,
        operand: Box<ExprKind>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<ExprKind>,
        rhs: Box<ExprKind>,
    },
    Call {
        callee: Box<ExprKind>,
        args: Vec<ExprKind>,
    },
    Assign {
        target: Box<ExprKind>,
        value: Box<ExprKind>,
    },
}

impl ExprKind {
    fn collect_idents(&self, out: &mut BTreeSet<String>) {
        match self {
            ExprKind::Ident(name) => {
                out.insert(name.clone());
            }
            // Only the root object of a member path is a free identifier.
            ExprKind::Member { object, .. } => object.collect_idents(out),
            ExprKind::Number(_) | ExprKind::Str(_) | ExprKind::Bool(_) => {}
            ExprKind::Unary { operand, .. } => operand.collect_idents(out),
            ExprKind::Binary { lhs, rhs, .. } => {
                lhs.collect_idents(out);
                rhs.collect_idents(out);
            }
            ExprKind::Call { callee, args } => {
                callee.collect_idents(out);
                for arg in args {
                    arg.collect_idents(out);
                }
            }
            ExprKind::Assign { target, value } => {
                target.collect_idents(out);
                value.collect_idents(out);
            }
        }
    }

    /// True when this expression is a bare call to `name(...)`.
    pub fn is_call_to(&self, name: &str) -> Option<&[ExprKind]> {
        if let ExprKind::Call { callee, args } = self
            && let ExprKind::Ident(callee_name) = callee.as_ref()
            && callee_name == name
        {
            return Some(args);
        }
        None
    }
}
