//! Error types for document construction.

use miette::Diagnostic;
use thiserror::Error;

use crate::dom::NodeId;

/// Errors raised while building or addressing a [`Dom`](crate::Dom).
///
/// Reading a document never fails; these only come out of the mutation
/// and import APIs.
#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DomError {
    /// The id does not belong to this document.
    #[error("unknown node {0}")]
    #[diagnostic(code(weaver::dom::unknown_node))]
    UnknownNode(NodeId),

    /// Text and comment nodes cannot have children.
    #[error("node {0} cannot have children")]
    #[diagnostic(code(weaver::dom::not_a_container))]
    NotAContainer(NodeId),

    /// Appending would make a node its own ancestor.
    #[error("cannot append {child} to {parent}: {child} is an inclusive ancestor of {parent}")]
    #[diagnostic(code(weaver::dom::hierarchy))]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Attributes and styles only exist on elements.
    #[error("node {0} is not an element")]
    #[diagnostic(code(weaver::dom::not_an_element))]
    NotAnElement(NodeId),

    /// The parsed HTML produced no `<body>`.
    #[error("parsed document has no <body> element")]
    #[diagnostic(code(weaver::dom::missing_body))]
    MissingBody,

    /// A child-index path did not resolve to a node.
    #[error("invalid node path `{0}`")]
    #[diagnostic(
        code(weaver::dom::invalid_path),
        help("paths are dot-separated child indices, e.g. `0.2.1`")
    )]
    InvalidPath(String),
}
