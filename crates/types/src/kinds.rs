//! Closed enums describing slots, updates, bindings, and render modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of dynamic region a slot marks.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotKind {
    /// A dynamic text position inside element content.
    Text,
    /// A dynamic attribute value on an element.
    Attribute,
    /// An event handler attribute, wired on every instantiation.
    Event,
    /// A whole conditional or iteration region, replaced as one unit.
    Block,
}

impl SlotKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKind::Text => "text",
            SlotKind::Attribute => "attribute",
            SlotKind::Event => "event",
            SlotKind::Block => "block",
        }
    }

    /// The update behavior the client runtime attaches to this slot kind.
    pub fn update_kind(&self) -> UpdateKind {
        match self {
            SlotKind::Text => UpdateKind::ReplaceText,
            SlotKind::Attribute => UpdateKind::SetAttribute,
            SlotKind::Event => UpdateKind::AddEventListener,
            SlotKind::Block => UpdateKind::ReplaceBlock,
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the client runtime keeps a slot live, recorded in binding descriptors.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateKind {
    ReplaceText,
    SetAttribute,
    AddEventListener,
    ReplaceBlock,
}

impl fmt::Display for UpdateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            UpdateKind::ReplaceText => "replaceText",
            UpdateKind::SetAttribute => "setAttribute",
            UpdateKind::AddEventListener => "addEventListener",
            UpdateKind::ReplaceBlock => "replaceBlock",
        };
        f.write_str(s)
    }
}

/// The kind of a reactive binding declared in a component body.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    /// Source of truth, created by the `signal(...)` constructor.
    Signal,
    /// Computed value, created by the `derived(...)` constructor.
    Derived,
}

impl fmt::Display for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Signal => f.write_str("signal"),
            BindingKind::Derived => f.write_str("derived"),
        }
    }
}

/// Per-file classification derived from the leading directive.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderMode {
    /// Universal component; emitted for every backend. The default.
    #[default]
    Client,
    /// `"use server"` component; the client (dom) emission is skipped.
    ServerOnly,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_kind_update_mapping() {
        assert_eq!(SlotKind::Text.update_kind(), UpdateKind::ReplaceText);
        assert_eq!(SlotKind::Attribute.update_kind(), UpdateKind::SetAttribute);
        assert_eq!(SlotKind::Event.update_kind(), UpdateKind::AddEventListener);
        assert_eq!(SlotKind::Block.update_kind(), UpdateKind::ReplaceBlock);
    }

    #[test]
    fn test_update_kind_serializes_camel_case() {
        let json = serde_json::to_string(&UpdateKind::AddEventListener).unwrap();
        assert_eq!(json, "\"addEventListener\"");
    }

    #[test]
    fn test_render_mode_default_is_client() {
        assert_eq!(RenderMode::default(), RenderMode::Client);
    }
}
