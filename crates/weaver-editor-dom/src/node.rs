//! Owned node values.
//!
//! These trees are detached: nothing in here points back into a
//! [`Dom`](crate::Dom). Selection extraction produces them by copying arena
//! nodes, so a [`Fragment`] can be mutated or moved freely without touching
//! the document it came from.

use smol_str::SmolStr;

/// A `name="value"` attribute. Names are stored lower-case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: SmolStr,
    pub value: String,
}

impl Attribute {
    pub fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: SmolStr::new(name.to_ascii_lowercase()),
            value: value.into(),
        }
    }
}

/// Inline style declarations, in declaration order.
///
/// Property names are kept exactly as stored (lower-cased when parsed from
/// markup), so prefix checks like `list-style` are case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    props: Vec<(SmolStr, String)>,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the value of a `style` attribute.
    ///
    /// Declarations missing a name or value are dropped. Later declarations
    /// of the same property replace earlier ones.
    pub fn parse(text: &str) -> Self {
        let mut style = Self::new();
        for decl in text.split(';') {
            let Some((name, value)) = decl.split_once(':') else {
                continue;
            };
            let (name, value) = (name.trim(), value.trim());
            if name.is_empty() || value.is_empty() {
                continue;
            }
            style.set(&name.to_ascii_lowercase(), value);
        }
        style
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.props
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set a property, keeping its position if it already exists.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.props.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.props.push((SmolStr::new(name), value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.props.iter().position(|(n, _)| n == name)?;
        Some(self.props.remove(idx).1)
    }

    /// Copy every property of `other` onto this style.
    pub fn set_all(&mut self, other: &Style) {
        for (name, value) in other.iter() {
            self.set(name, value);
        }
    }

    /// A new style holding only the properties `keep` accepts.
    pub fn filter(&self, mut keep: impl FnMut(&str, &str) -> bool) -> Style {
        Style {
            props: self
                .props
                .iter()
                .filter(|(n, v)| keep(n, v))
                .cloned()
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.props.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Serialize as a `style` attribute value: `a: b; c: d;`.
    pub fn to_css(&self) -> String {
        self.iter()
            .map(|(n, v)| format!("{n}: {v};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A detached element with its own subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: SmolStr,
    pub attrs: Vec<Attribute>,
    pub style: Style,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element. Tag names are lower-cased.
    pub fn new(tag: &str) -> Self {
        Self {
            tag: SmolStr::new(tag.to_ascii_lowercase()),
            attrs: Vec::new(),
            style: Style::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let attr = Attribute::new(name, value);
        match self.attrs.iter_mut().find(|a| a.name == attr.name) {
            Some(existing) => existing.value = attr.value,
            None => self.attrs.push(attr),
        }
    }

    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let idx = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(idx).value)
    }

    pub fn append(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.children.extend(nodes);
    }

    /// Child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }
}

/// An owned node value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(|el| el.tag.as_str())
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
            Node::Text(text) => out.push_str(text),
            Node::Comment(_) => {}
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// A detached, parentless list of nodes.
///
/// This is the unit selection extraction hands back to callers: it may be
/// empty, hold a bare run of cloned content, or hold a single wrapping root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    pub children: Vec<Node>,
}

impl Fragment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_nodes(children: Vec<Node>) -> Self {
        Self { children }
    }

    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            children: elements.into_iter().map(Node::Element).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// The root element, if the fragment is exactly one element.
    pub fn single_root(&self) -> Option<&Element> {
        match self.children.as_slice() {
            [Node::Element(el)] => Some(el),
            _ => None,
        }
    }

    pub fn single_root_mut(&mut self) -> Option<&mut Element> {
        match self.children.as_mut_slice() {
            [Node::Element(el)] => Some(el),
            _ => None,
        }
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.children
    }

    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}
