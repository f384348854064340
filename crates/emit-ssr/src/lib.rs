//! Server backend.
//!
//! Serializes a marked template as a tag-delimited HTML template:
//! `{{ expr }}` interpolations and `{% if %}`/`{% for %}` control tags, with
//! the same `data-slot` markers the dom backend writes. A server template
//! has no native event binding, so event slots are omitted from the output
//! and reported through the emission for the binding descriptor to record.

mod emitter;

pub use emitter::SsrEmitter;
