//! Partitions an analyzed component AST into static skeleton and slot table.
//!
//! Slot identifiers come from a zero-based pre-order counter: attributes in
//! source order first, then children. The same AST shape therefore yields
//! the same identifiers on every run. Control blocks are one slot each;
//! their children are kept intact inside the region and never allocate
//! slots of their own.

use crate::error::ExtractError;
use marq_analysis::Analysis;
use marq_ir::{
    BindingDecl, BlockRegion, MarkedTemplate, SkeletonAttr, SkeletonAttrValue, SkeletonElement,
    SkeletonNode, Slot,
};
use marq_syntax::{
    AttrValue, Component, ControlBlock, ControlKind, ElementNode, Node,
};
use marq_types::{SlotId, SlotKind};
use std::collections::BTreeSet;

/// Extracts the marked template for one component.
pub fn extract(component: &Component, analysis: &Analysis) -> Result<MarkedTemplate, ExtractError> {
    let mut extractor = SlotExtractor {
        analysis,
        slots: Vec::new(),
    };
    let root = extractor.node(&component.root, false)?;

    log::debug!(
        "extracted {} slots from component '{}'",
        extractor.slots.len(),
        component.name
    );

    // The binding table rides along in the IR so descriptors can hand the
    // runtime its signal/derived initializers.
    let bindings = component
        .declarations
        .iter()
        .filter_map(|decl| {
            analysis.binding(&decl.name).map(|binding| BindingDecl {
                name: binding.name.clone(),
                kind: binding.kind,
                init: decl.init.raw.clone(),
                reads: binding.reads.clone(),
            })
        })
        .collect();

    MarkedTemplate::new(
        component.name.clone(),
        component.mode,
        component.params.clone(),
        bindings,
        root,
        extractor.slots,
    )
    .map_err(Into::into)
}

struct SlotExtractor<'a> {
    analysis: &'a Analysis,
    slots: Vec<Slot>,
}

impl SlotExtractor<'_> {
    fn alloc(
        &mut self,
        kind: SlotKind,
        name: Option<String>,
        expr: String,
        deps: BTreeSet<String>,
    ) -> SlotId {
        let id = SlotId::new(self.slots.len() as u32);
        self.slots.push(Slot {
            id,
            kind,
            name,
            expr,
            deps,
        });
        id
    }

    fn node(&mut self, node: &Node, in_region: bool) -> Result<SkeletonNode, ExtractError> {
        match node {
            Node::Text(text) => Ok(SkeletonNode::Text(text.clone())),
            Node::Expression(expr_node) => {
                let expr = &expr_node.expr;
                if in_region || !self.analysis.is_reactive(expr) {
                    // Static classification: rendered once, no slot marker.
                    return Ok(SkeletonNode::StaticExpr(expr.raw.clone()));
                }
                let deps = self.analysis.deps_of(expr);
                let id = self.alloc(SlotKind::Text, None, expr.raw.clone(), deps);
                Ok(SkeletonNode::TextSlot(id))
            }
            Node::Element(element) => self.element(element, in_region).map(SkeletonNode::Element),
            Node::Fragment(children) => {
                let children = self.nodes(children, in_region)?;
                Ok(SkeletonNode::Fragment(children))
            }
            Node::ControlBlock(block) => self.block(block, in_region),
        }
    }

    fn nodes(&mut self, nodes: &[Node], in_region: bool) -> Result<Vec<SkeletonNode>, ExtractError> {
        nodes.iter().map(|n| self.node(n, in_region)).collect()
    }

    fn element(
        &mut self,
        element: &ElementNode,
        in_region: bool,
    ) -> Result<SkeletonElement, ExtractError> {
        let mut attrs = Vec::with_capacity(element.attributes.len());
        for attr in &element.attributes {
            let value = if attr.is_event() {
                let AttrValue::Dynamic(expr) = &attr.value else {
                    return Err(ExtractError::Unsupported {
                        construct: format!("event attribute '{}' with a static value", attr.name),
                        location: attr.location,
                    });
                };
                if in_region {
                    SkeletonAttrValue::EventExpr(expr.raw.clone())
                } else {
                    // Event handlers are wired on every instantiation, so
                    // they are slots even when the body reads no state.
                    let deps = self.analysis.deps_of(expr);
                    let id = self.alloc(
                        SlotKind::Event,
                        Some(attr.name.clone()),
                        expr.raw.clone(),
                        deps,
                    );
                    SkeletonAttrValue::EventSlot(id)
                }
            } else {
                match &attr.value {
                    AttrValue::Static(value) => SkeletonAttrValue::Static(value.clone()),
                    AttrValue::Dynamic(expr) => {
                        if in_region || !self.analysis.is_reactive(expr) {
                            SkeletonAttrValue::Expr(expr.raw.clone())
                        } else {
                            let deps = self.analysis.deps_of(expr);
                            let id = self.alloc(
                                SlotKind::Attribute,
                                Some(attr.name.clone()),
                                expr.raw.clone(),
                                deps,
                            );
                            SkeletonAttrValue::Slot(id)
                        }
                    }
                }
            };
            attrs.push(SkeletonAttr {
                name: attr.name.clone(),
                value,
            });
        }

        let children = self.nodes(&element.children, in_region)?;
        Ok(SkeletonElement {
            tag: element.tag.clone(),
            attrs,
            children,
        })
    }

    /// A control block is one replaceable region: one slot for the whole
    /// block, children extracted without markers. Partial patching inside a
    /// region would require re-deriving child scopes, which the runtime owns.
    fn block(&mut self, block: &ControlBlock, in_region: bool) -> Result<SkeletonNode, ExtractError> {
        let governing = block.governing_expr();
        let slot = if in_region {
            None
        } else {
            let deps = self.analysis.deps_of(governing);
            Some(self.alloc(SlotKind::Block, None, governing.raw.clone(), deps))
        };

        let region = match &block.kind {
            ControlKind::If {
                condition,
                then_branch,
                else_branch,
            } => BlockRegion::If {
                condition: condition.raw.clone(),
                then_branch: self.nodes(then_branch, true)?,
                else_branch: self.nodes(else_branch, true)?,
            },
            ControlKind::Each {
                item,
                source,
                key,
                body,
            } => BlockRegion::Each {
                item: item.clone(),
                source: source.raw.clone(),
                key: key.raw.clone(),
                body: self.nodes(body, true)?,
            },
        };

        Ok(SkeletonNode::Block {
            slot,
            region: Box::new(region),
        })
    }
}
