//! weaver-editor-dom: a small DOM for editor selection work.
//!
//! This crate provides:
//! - `Dom` - arena-backed document tree addressed by `NodeId`
//! - `Node`/`Element`/`Fragment` - owned, detached node values
//! - `Range` - boundary-point ranges with DOM "clone the contents" semantics
//! - `element_type` - tag classification (inline, heading, list, table cell)
//! - `parents` - ancestor chains bounded by a root element
//! - HTML import (html5ever) and serialization

pub mod dom;
pub mod element_type;
pub mod error;
pub mod html;
pub mod node;
pub mod parents;
pub mod range;

pub use dom::{Ancestors, Dom, ElementData, NodeId, NodeKind};
pub use error::DomError;
pub use node::{Attribute, Element, Fragment, Node, Style};
pub use parents::{ancestor_by_tag, parents, parents_and_self, parents_until};
pub use range::{BoundaryPoint, Range, compare_points};
pub use smol_str::SmolStr;
