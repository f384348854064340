//! Client dom backend.
//!
//! Serializes a marked template as a JSX module: one exported render
//! function per component, slot markers as `data-slot` attributes, and
//! dynamic positions delegated to the client runtime through a namespace
//! import. Event slots are fully representable here, so this backend never
//! omits a slot.

mod emitter;

pub use emitter::JsxEmitter;
