//! Newtype wrappers for slot and scope identifiers
//!
//! These types provide compile-time type safety so slot indices, scope
//! markers, and ordinary strings cannot be mixed up in pipeline signatures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// A stable identifier for one dynamic region within a component.
///
/// Slot identifiers are assigned by a zero-based pre-order counter during
/// extraction; identical source yields identical identifiers every run. The
/// wire form is `slot_<N>`, which is what appears in the `data-slot`
/// attribute of every backend emission.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(u32);

impl SlotId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the zero-based pre-order index.
    pub fn index(&self) -> u32 {
        self.0
    }

    /// Returns the wire form used in `data-slot` attributes, e.g. `slot_3`.
    pub fn attr_value(&self) -> String {
        format!("slot_{}", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot_{}", self.0)
    }
}

/// The scope marker for one component instantiation.
///
/// Carries the component name; emitted as the `data-scope` attribute on the
/// component's root element in every backend.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScopeId(Arc<str>);

impl ScopeId {
    /// Creates a new ScopeId from a component name
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    /// Returns the string representation of this scope ID
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ScopeId {
    fn from(s: String) -> Self {
        Self(s.into())
    }
}

impl From<&str> for ScopeId {
    fn from(s: &str) -> Self {
        Self(s.into())
    }
}

impl AsRef<str> for ScopeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_wire_form() {
        let id = SlotId::new(0);
        assert_eq!(id.attr_value(), "slot_0");
        assert_eq!(SlotId::new(42).to_string(), "slot_42");
    }

    #[test]
    fn test_slot_id_ordering() {
        let mut ids = vec![SlotId::new(2), SlotId::new(0), SlotId::new(1)];
        ids.sort();
        assert_eq!(ids, vec![SlotId::new(0), SlotId::new(1), SlotId::new(2)]);
    }

    #[test]
    fn test_scope_id_creation() {
        let a = ScopeId::new("Counter");
        let b = ScopeId::from("Counter");
        let c = ScopeId::from(String::from("Counter"));

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.as_str(), "Counter");
    }
}
