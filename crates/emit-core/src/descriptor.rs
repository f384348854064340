//! Binding descriptor generation.
//!
//! The descriptor is the compiler's hand-off to the client runtime: per
//! component, an ordered mapping from slot identifier to the original
//! expression source, its resolved dependency set, and the update behavior
//! to attach at mount time. Backends that omitted a slot (a server template
//! has no native event binding) are recorded per slot so the runtime patches
//! those from the client bundle.

use crate::Emission;
use marq_ir::MarkedTemplate;
use marq_types::{BindingKind, RenderMode, SlotKind, UpdateKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingDescriptor {
    pub component: String,
    pub scope: String,
    pub mode: RenderMode,
    /// Declaration-order reactive bindings the runtime instantiates at
    /// mount time.
    pub bindings: Vec<BindingEntry>,
    /// Ordered by slot identifier; order is part of the wire contract.
    pub slots: Vec<SlotBinding>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindingEntry {
    pub name: String,
    pub kind: BindingKind,
    pub init: String,
    pub reads: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotBinding {
    /// Wire form, e.g. `slot_0`.
    pub id: String,
    pub kind: SlotKind,
    pub update: UpdateKind,
    /// Attribute or event name for attribute/event slots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Verbatim source of the expression or handler.
    pub expr: String,
    /// Sorted transitive signal dependencies.
    pub deps: Vec<String>,
    /// Backends whose emission omitted this slot.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub omitted_in: Vec<String>,
}

impl BindingDescriptor {
    /// Builds the descriptor for one component from its IR and the backend
    /// emissions produced from it. Deterministic given the same inputs.
    pub fn generate(template: &MarkedTemplate, emissions: &[Emission]) -> Self {
        let slots = template
            .slots
            .iter()
            .map(|slot| {
                let omitted_in: Vec<String> = emissions
                    .iter()
                    .filter(|emission| emission.omitted.contains(&slot.id))
                    .map(|emission| emission.backend.to_string())
                    .collect();
                SlotBinding {
                    id: slot.id.attr_value(),
                    kind: slot.kind,
                    update: slot.update_kind(),
                    name: slot.name.clone(),
                    expr: slot.expr.clone(),
                    deps: slot.deps.iter().cloned().collect(),
                    omitted_in,
                }
            })
            .collect();

        let bindings = template
            .bindings
            .iter()
            .map(|binding| BindingEntry {
                name: binding.name.clone(),
                kind: binding.kind,
                init: binding.init.clone(),
                reads: binding.reads.iter().cloned().collect(),
            })
            .collect();

        BindingDescriptor {
            component: template.component.clone(),
            scope: template.scope.to_string(),
            mode: template.mode,
            bindings,
            slots,
        }
    }

    /// Serializes the descriptor as pretty JSON. Field order is fixed by the
    /// struct definitions, so identical IR yields byte-identical output.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Artifact file name, derived from the component name.
    pub fn file_name(component: &str) -> String {
        format!("{}.bindings.json", component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marq_ir::{SkeletonElement, SkeletonNode, Slot};
    use marq_types::SlotId;
    use std::collections::BTreeSet;

    fn template_with_event_slot() -> MarkedTemplate {
        let root = SkeletonNode::Element(SkeletonElement {
            tag: "button".to_string(),
            attrs: vec![marq_ir::SkeletonAttr {
                name: "onClick".to_string(),
                value: marq_ir::SkeletonAttrValue::EventSlot(SlotId::new(0)),
            }],
            children: vec![],
        });
        let slots = vec![Slot {
            id: SlotId::new(0),
            kind: SlotKind::Event,
            name: Some("onClick".to_string()),
            expr: "count = count + 1".to_string(),
            deps: BTreeSet::from(["count".to_string()]),
        }];
        MarkedTemplate::new("Clicker", RenderMode::Client, vec![], vec![], root, slots).unwrap()
    }

    #[test]
    fn test_descriptor_records_omissions() {
        let template = template_with_event_slot();
        let emissions = vec![
            Emission {
                backend: "dom",
                source: String::new(),
                omitted: vec![],
            },
            Emission {
                backend: "ssr",
                source: String::new(),
                omitted: vec![SlotId::new(0)],
            },
        ];
        let descriptor = BindingDescriptor::generate(&template, &emissions);
        assert_eq!(descriptor.slots.len(), 1);
        assert_eq!(descriptor.slots[0].id, "slot_0");
        assert_eq!(descriptor.slots[0].update, UpdateKind::AddEventListener);
        assert_eq!(descriptor.slots[0].omitted_in, vec!["ssr".to_string()]);
    }

    #[test]
    fn test_descriptor_json_is_deterministic() {
        let template = template_with_event_slot();
        let a = BindingDescriptor::generate(&template, &[]).to_json().unwrap();
        let b = BindingDescriptor::generate(&template, &[]).to_json().unwrap();
        assert_eq!(a, b);
        assert!(a.contains("\"addEventListener\""));
    }
}
