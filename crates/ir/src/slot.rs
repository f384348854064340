//! Slot table and binding table entries.

use marq_types::{BindingKind, SlotId, SlotKind, UpdateKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One dynamic region of a component: its stable identifier, kind, governing
/// expression, and resolved reactive dependencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub kind: SlotKind,
    /// Attribute or event-attribute name for `attribute`/`event` slots.
    pub name: Option<String>,
    /// Verbatim source of the expression or handler body.
    pub expr: String,
    /// Transitive signal dependency set. Sorted; empty for event slots whose
    /// handlers read no reactive state and for always-static block heads.
    pub deps: BTreeSet<String>,
}

impl Slot {
    pub fn update_kind(&self) -> UpdateKind {
        self.kind.update_kind()
    }
}

/// One reactive binding declared in the component body, carried through the
/// IR so the runtime can create signals and derived values at mount time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingDecl {
    pub name: String,
    pub kind: BindingKind,
    /// Verbatim initializer source.
    pub init: String,
    /// Direct upstream bindings (empty for signals). The dependency
    /// relation is acyclic; analysis rejects cycles before the IR exists.
    pub reads: BTreeSet<String>,
}
