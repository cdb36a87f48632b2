//! Arena-backed document tree.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`].
//! Parent links make upward walks cheap, which is what selection code does
//! most. Reads never fail: an id that isn't part of the document simply has
//! no tag, no parent and no children.

use std::fmt;

use smol_str::SmolStr;

use crate::error::DomError;
use crate::node::{Attribute, Element, Node, Style};

/// Handle to a node inside a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Element payload stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub tag: SmolStr,
    pub attrs: Vec<Attribute>,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A document tree.
#[derive(Debug, Clone)]
pub struct Dom {
    nodes: Vec<NodeData>,
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom {
    /// Create a document containing only its document node.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document node every attached node descends from.
    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes ever created, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    fn data_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        self.nodes
            .get_mut(id.index())
            .ok_or(DomError::UnknownNode(id))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    // === Construction ===

    /// Create a detached element. Tag names are lower-cased.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData {
            tag: SmolStr::new(tag.to_ascii_lowercase()),
            attrs: Vec::new(),
            style: Style::new(),
        }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Comment(text.into()))
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// current parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        match self.data(parent).map(|d| &d.kind) {
            None => return Err(DomError::UnknownNode(parent)),
            Some(NodeKind::Text(_) | NodeKind::Comment(_)) => {
                return Err(DomError::NotAContainer(parent));
            }
            Some(_) => {}
        }
        if self.data(child).is_none() {
            return Err(DomError::UnknownNode(child));
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest { parent, child });
        }

        self.detach(child);
        self.data_mut(child)?.parent = Some(parent);
        self.data_mut(parent)?.children.push(child);
        Ok(())
    }

    /// Remove a node from its parent. The subtree stays in the arena.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(data) = self.nodes.get_mut(parent.index()) {
            data.children.retain(|&c| c != id);
        }
        if let Some(data) = self.nodes.get_mut(id.index()) {
            data.parent = None;
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Result<&mut ElementData, DomError> {
        match &mut self.data_mut(id)?.kind {
            NodeKind::Element(el) => Ok(el),
            _ => Err(DomError::NotAnElement(id)),
        }
    }

    /// Set an attribute. `style` is parsed into the element's [`Style`].
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        if name.eq_ignore_ascii_case("style") {
            el.style = Style::parse(value);
            return Ok(());
        }
        let attr = Attribute::new(name, value);
        match el.attrs.iter_mut().find(|a| a.name == attr.name) {
            Some(existing) => existing.value = attr.value,
            None => el.attrs.push(attr),
        }
        Ok(())
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<(), DomError> {
        let el = self.element_mut(id)?;
        if name.eq_ignore_ascii_case("style") {
            el.style = Style::new();
        } else {
            el.attrs.retain(|a| !a.name.eq_ignore_ascii_case(name));
        }
        Ok(())
    }

    pub fn style_mut(&mut self, id: NodeId) -> Result<&mut Style, DomError> {
        Ok(&mut self.element_mut(id)?.style)
    }

    // === Node access ===

    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.data(id).map(|d| &d.kind)
    }

    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.kind(id)? {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Lower-case tag name, or `None` for non-elements.
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|el| el.tag.as_str())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value.as_str())
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn style(&self, id: NodeId) -> Option<&Style> {
        self.element(id).map(|el| &el.style)
    }

    /// Character data of a text or comment node.
    pub fn character_data(&self, id: NodeId) -> Option<&str> {
        match self.kind(id)? {
            NodeKind::Text(text) | NodeKind::Comment(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_character_data(&self, id: NodeId) -> bool {
        self.character_data(id).is_some()
    }

    /// Node length in the DOM sense: characters for text and comments,
    /// child count for everything else.
    pub fn node_length(&self, id: NodeId) -> usize {
        match self.character_data(id) {
            Some(text) => text.chars().count(),
            None => self.children(id).len(),
        }
    }

    // === Traversal ===

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.data(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.data(id).map(|d| d.children.as_slice()).unwrap_or(&[])
    }

    pub fn has_children(&self, id: NodeId) -> bool {
        !self.children(id).is_empty()
    }

    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).first().copied()
    }

    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).last().copied()
    }

    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.index_in_parent(id)?;
        let parent = self.parent(id)?;
        idx.checked_sub(1).and_then(|i| self.child(parent, i))
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let idx = self.index_in_parent(id)?;
        self.child(self.parent(id)?, idx + 1)
    }

    /// Proper ancestors, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            dom: self,
            next: self.parent(id),
        }
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// All descendants in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Child indices from the document node down to `id`.
    pub fn index_path(&self, id: NodeId) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = id;
        while let Some(idx) = self.index_in_parent(current) {
            path.push(idx);
            match self.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Follow a child-index path down from `from`.
    pub fn node_at_path(&self, from: NodeId, path: &[usize]) -> Option<NodeId> {
        path.iter()
            .try_fold(from, |node, &index| self.child(node, index))
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self, id: NodeId) -> String {
        match self.kind(id) {
            Some(NodeKind::Text(text)) => text.clone(),
            Some(NodeKind::Comment(_)) | None => String::new(),
            Some(_) => self
                .descendants(id)
                .into_iter()
                .filter_map(|d| match self.kind(d) {
                    Some(NodeKind::Text(text)) => Some(text.as_str()),
                    _ => None,
                })
                .collect(),
        }
    }

    // === Copies ===

    /// Copy a node without its children: same tag, attributes and styles.
    ///
    /// Returns `None` for the document node and unknown ids.
    pub fn shallow_clone(&self, id: NodeId) -> Option<Node> {
        match self.kind(id)? {
            NodeKind::Document => None,
            NodeKind::Element(el) => Some(Node::Element(Element {
                tag: el.tag.clone(),
                attrs: el.attrs.clone(),
                style: el.style.clone(),
                children: Vec::new(),
            })),
            NodeKind::Text(text) => Some(Node::Text(text.clone())),
            NodeKind::Comment(text) => Some(Node::Comment(text.clone())),
        }
    }

    /// Shallow copy of an element as an [`Element`] value.
    pub fn shallow_clone_element(&self, id: NodeId) -> Option<Element> {
        match self.shallow_clone(id)? {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Copy a node and its whole subtree.
    pub fn deep_clone(&self, id: NodeId) -> Option<Node> {
        let mut node = self.shallow_clone(id)?;
        if let Node::Element(el) = &mut node {
            el.children = self
                .children(id)
                .iter()
                .filter_map(|&child| self.deep_clone(child))
                .collect();
        }
        Some(node)
    }

    pub fn deep_clone_element(&self, id: NodeId) -> Option<Element> {
        match self.deep_clone(id)? {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }
}

/// Iterator over a node's proper ancestors, nearest first.
#[derive(Debug, Clone)]
pub struct Ancestors<'a> {
    dom: &'a Dom,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.dom.parent(current);
        Some(current)
    }
}
