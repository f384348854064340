//! The marked-template IR and its invariant checks.

use crate::error::IrError;
use crate::node::{BlockRegion, SkeletonAttrValue, SkeletonNode};
use crate::slot::{BindingDecl, Slot};
use marq_types::{RenderMode, ScopeId, SlotId};
use serde::{Deserialize, Serialize};

/// One compiled component, independent of any target syntax: the static
/// skeleton, the slot table, and the scope marker. Built once per source
/// file; every backend emitter consumes it read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkedTemplate {
    pub component: String,
    pub scope: ScopeId,
    pub mode: RenderMode,
    pub params: Vec<String>,
    /// Declaration-order reactive binding table.
    pub bindings: Vec<BindingDecl>,
    pub root: SkeletonNode,
    pub slots: Vec<Slot>,
}

impl MarkedTemplate {
    /// Assembles the IR and validates its invariants. A violation is a
    /// defect in extraction, not a user error.
    pub fn new(
        component: impl Into<String>,
        mode: RenderMode,
        params: Vec<String>,
        bindings: Vec<BindingDecl>,
        root: SkeletonNode,
        slots: Vec<Slot>,
    ) -> Result<Self, IrError> {
        let component = component.into();
        let template = MarkedTemplate {
            scope: ScopeId::new(component.as_str()),
            component,
            mode,
            params,
            bindings,
            root,
            slots,
        };
        template.validate()?;
        Ok(template)
    }

    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.id == id)
    }

    /// Invariants: the slot table is densely numbered from zero in order,
    /// and the skeleton references each table entry exactly once, in
    /// pre-order.
    pub fn validate(&self) -> Result<(), IrError> {
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.id.index() as usize != i {
                return Err(IrError::InternalConsistency(format!(
                    "slot table entry {} carries id {}",
                    i, slot.id
                )));
            }
        }

        let mut referenced = Vec::new();
        collect_slot_refs(&self.root, &mut referenced, false)?;

        if referenced.len() != self.slots.len() {
            return Err(IrError::InternalConsistency(format!(
                "skeleton references {} slots but the table has {}",
                referenced.len(),
                self.slots.len()
            )));
        }
        for (i, id) in referenced.iter().enumerate() {
            if id.index() as usize != i {
                return Err(IrError::InternalConsistency(format!(
                    "skeleton reference {} out of pre-order position (found {})",
                    id, i
                )));
            }
        }
        Ok(())
    }
}

fn collect_slot_refs(
    node: &SkeletonNode,
    out: &mut Vec<SlotId>,
    in_region: bool,
) -> Result<(), IrError> {
    match node {
        SkeletonNode::Element(element) => {
            for attr in &element.attrs {
                match attr.value {
                    SkeletonAttrValue::Slot(id) | SkeletonAttrValue::EventSlot(id) => {
                        if in_region {
                            return Err(IrError::InternalConsistency(format!(
                                "slot {} marked inside a block region",
                                id
                            )));
                        }
                        out.push(id);
                    }
                    _ => {}
                }
            }
            for child in &element.children {
                collect_slot_refs(child, out, in_region)?;
            }
        }
        SkeletonNode::Text(_) | SkeletonNode::StaticExpr(_) => {}
        SkeletonNode::TextSlot(id) => {
            if in_region {
                return Err(IrError::InternalConsistency(format!(
                    "slot {} marked inside a block region",
                    id
                )));
            }
            out.push(*id);
        }
        SkeletonNode::Block { slot, region } => {
            match (slot, in_region) {
                (Some(id), true) => {
                    return Err(IrError::InternalConsistency(format!(
                        "slot {} marked inside a block region",
                        id
                    )));
                }
                (Some(id), false) => out.push(*id),
                (None, true) => {}
                (None, false) => {
                    return Err(IrError::InternalConsistency(
                        "top-level block region carries no slot".to_string(),
                    ));
                }
            }
            let children: Vec<&SkeletonNode> = match region.as_ref() {
                BlockRegion::If {
                    then_branch,
                    else_branch,
                    ..
                } => then_branch.iter().chain(else_branch.iter()).collect(),
                BlockRegion::Each { body, .. } => body.iter().collect(),
            };
            for child in children {
                collect_slot_refs(child, out, true)?;
            }
        }
        SkeletonNode::Fragment(children) => {
            for child in children {
                collect_slot_refs(child, out, in_region)?;
            }
        }
    }
    Ok(())
}
