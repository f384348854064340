//! Static skeleton nodes.
//!
//! The skeleton is the target-independent shape of a component's output:
//! static structure verbatim, dynamic regions reduced to slot references.
//! Expressions appear only as verbatim source text; the IR never re-parses
//! them.

use marq_types::SlotId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkeletonNode {
    Element(SkeletonElement),
    Text(String),
    /// A one-time interpolation with no reactive reads; rendered inline by
    /// every backend, carries no slot marker.
    StaticExpr(String),
    /// A dynamic text position, marked `data-slot="slot_<N>"`.
    TextSlot(SlotId),
    /// A conditional or iteration region. Top-level blocks carry the slot
    /// that marks the whole region; blocks nested inside another region are
    /// unmarked (the outer region is the unit of replacement).
    Block {
        slot: Option<SlotId>,
        region: Box<BlockRegion>,
    },
    Fragment(Vec<SkeletonNode>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonElement {
    pub tag: String,
    /// Attributes in source order; order is part of slot-identifier
    /// determinism.
    pub attrs: Vec<SkeletonAttr>,
    pub children: Vec<SkeletonNode>,
}

impl SkeletonElement {
    /// Slot identifiers owned by this element's attributes, in source order.
    pub fn attr_slot_ids(&self) -> Vec<SlotId> {
        self.attrs
            .iter()
            .filter_map(|attr| match attr.value {
                SkeletonAttrValue::Slot(id) | SkeletonAttrValue::EventSlot(id) => Some(id),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkeletonAttr {
    pub name: String,
    pub value: SkeletonAttrValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkeletonAttrValue {
    /// Literal attribute value, emitted verbatim.
    Static(String),
    /// One-time dynamic value (static classification or inside a block
    /// region); no slot marker.
    Expr(String),
    /// An attribute slot.
    Slot(SlotId),
    /// An event slot.
    EventSlot(SlotId),
    /// An inline handler inside a block region; no slot marker.
    EventExpr(String),
}

/// The body of a control block, kept intact as one replaceable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockRegion {
    If {
        condition: String,
        then_branch: Vec<SkeletonNode>,
        else_branch: Vec<SkeletonNode>,
    },
    Each {
        item: String,
        source: String,
        key: String,
        body: Vec<SkeletonNode>,
    },
}
