//! Marked-template intermediate representation.
//!
//! One serializable structure per component: static skeleton, slot table,
//! and scope marker. Backend emitters and the binding-descriptor generator
//! consume this IR; nothing downstream re-inspects component source.

pub mod error;
pub mod node;
pub mod slot;
pub mod template;

pub use error::IrError;
pub use node::{BlockRegion, SkeletonAttr, SkeletonAttrValue, SkeletonElement, SkeletonNode};
pub use slot::{BindingDecl, Slot};
pub use template::MarkedTemplate;
