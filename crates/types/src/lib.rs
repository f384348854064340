//! Foundation types shared by every marq crate.
//!
//! This crate holds the identifier newtypes and the closed enums that travel
//! through the whole pipeline: slot and scope identifiers, slot kinds, update
//! kinds, reactive binding kinds, and the per-file render mode.

pub mod ids;
pub mod kinds;

pub use ids::{ScopeId, SlotId};
pub use kinds::{BindingKind, RenderMode, SlotKind, UpdateKind};

/// Attribute name carrying the scope identifier on a component's root element.
pub const SCOPE_ATTR: &str = "data-scope";

/// Attribute name carrying slot identifiers on marked elements.
pub const SLOT_ATTR: &str = "data-slot";
