//! HTML import and serialization.
//!
//! Import goes through html5ever so documents get browser-grade tree
//! construction (implied `tbody`, foster parenting, etc). Serialization
//! feeds the owned node values to html5ever's serializer, which owns the
//! escaping rules and raw-text handling.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, QualName, ns, parse_document, serialize};
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::dom::{Dom, NodeId};
use crate::error::DomError;
use crate::node::{Element, Fragment, Node};

impl Dom {
    /// Parse an HTML document, returning the tree and its `<body>`.
    pub fn parse_html(html: &str) -> Result<(Dom, NodeId), DomError> {
        let rcdom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut dom = Dom::new();
        let doc = dom.document();
        import_children(&mut dom, doc, &rcdom.document)?;

        let body = dom
            .descendants(doc)
            .into_iter()
            .find(|&id| dom.tag(id) == Some("body"))
            .ok_or(DomError::MissingBody)?;

        tracing::trace!(nodes = dom.len(), "parse_html: imported document");
        Ok((dom, body))
    }

    /// Serialize a node and its subtree.
    pub fn to_html(&self, id: NodeId) -> String {
        self.deep_clone(id).map(|n| n.to_html()).unwrap_or_default()
    }

    /// Serialize the children of a node.
    pub fn inner_html(&self, id: NodeId) -> String {
        let children = Fragment::from_nodes(
            self.children(id)
                .iter()
                .filter_map(|&c| self.deep_clone(c))
                .collect(),
        );
        write_html(
            &children,
            TraversalScope::ChildrenOnly(self.tag(id).map(html_name)),
        )
    }
}

fn import_children(dom: &mut Dom, parent: NodeId, handle: &Handle) -> Result<(), DomError> {
    for child in handle.children.borrow().iter() {
        let id = match &child.data {
            NodeData::Element { name, attrs, .. } => {
                let id = dom.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    dom.set_attribute(id, &attr.name.local, &attr.value)?;
                }
                id
            }
            NodeData::Text { contents } => dom.create_text(contents.borrow().to_string()),
            NodeData::Comment { contents } => dom.create_comment(contents.to_string()),
            _ => continue,
        };
        dom.append_child(parent, id)?;
        import_children(dom, id, child)?;
    }
    Ok(())
}

fn html_name(tag: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(tag))
}

fn attr_name(name: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(name))
}

fn write_html<T: Serialize>(node: &T, traversal_scope: TraversalScope) -> String {
    let mut out = Vec::new();
    let opts = SerializeOpts {
        traversal_scope,
        ..Default::default()
    };
    if let Err(err) = serialize(&mut out, node, opts) {
        tracing::warn!(%err, "to_html: serialization failed");
    }
    String::from_utf8_lossy(&out).into_owned()
}

impl Serialize for Element {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        let include_node = matches!(traversal_scope, TraversalScope::IncludeNode);
        let name = html_name(&self.tag);
        if include_node {
            let css = (!self.style.is_empty()).then(|| self.style.to_css());
            let names: Vec<QualName> = self
                .attrs
                .iter()
                .map(|attr| attr_name(&attr.name))
                .chain(css.as_ref().map(|_| attr_name("style")))
                .collect();
            let values = self
                .attrs
                .iter()
                .map(|attr| attr.value.as_str())
                .chain(css.as_deref());
            serializer.start_elem(name.clone(), names.iter().zip(values))?;
        }
        for child in &self.children {
            child.serialize(serializer, TraversalScope::IncludeNode)?;
        }
        if include_node {
            serializer.end_elem(name)?;
        }
        Ok(())
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match (self, traversal_scope) {
            (Node::Element(el), scope) => el.serialize(serializer, scope),
            (Node::Text(text), TraversalScope::IncludeNode) => serializer.write_text(text),
            (Node::Comment(text), TraversalScope::IncludeNode) => serializer.write_comment(text),
            (_, TraversalScope::ChildrenOnly(_)) => Ok(()),
        }
    }
}

/// A fragment has no node of its own; its children are always written.
impl Serialize for Fragment {
    fn serialize<S>(&self, serializer: &mut S, _traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        for child in &self.children {
            child.serialize(serializer, TraversalScope::IncludeNode)?;
        }
        Ok(())
    }
}

impl Node {
    pub fn to_html(&self) -> String {
        write_html(self, TraversalScope::IncludeNode)
    }
}

impl Element {
    /// Serialize this element. The `style` attribute is written last.
    pub fn to_html(&self) -> String {
        write_html(self, TraversalScope::IncludeNode)
    }
}

impl Fragment {
    /// Serialize the fragment's nodes in order. Top-level text is escaped.
    pub fn to_html(&self) -> String {
        write_html(self, TraversalScope::ChildrenOnly(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body() {
        let (dom, body) = Dom::parse_html("<p>a<b class=\"x\">b</b></p>").unwrap();
        assert_eq!(dom.tag(body), Some("body"));
        insta::assert_snapshot!(dom.inner_html(body), @r#"<p>a<b class="x">b</b></p>"#);
    }

    #[test]
    fn test_parse_inserts_tbody() {
        let (dom, body) = Dom::parse_html("<table><tr><td>1</td></tr></table>").unwrap();
        insta::assert_snapshot!(
            dom.inner_html(body),
            @"<table><tbody><tr><td>1</td></tr></tbody></table>"
        );
    }

    #[test]
    fn test_style_round_trip() {
        let (dom, body) =
            Dom::parse_html("<ul style=\"list-style-type:square;COLOR: red\" id=\"l\"></ul>")
                .unwrap();
        insta::assert_snapshot!(
            dom.inner_html(body),
            @r#"<ul id="l" style="list-style-type: square; color: red;"></ul>"#
        );
    }

    #[test]
    fn test_escaping_and_void() {
        let mut el = Element::new("p");
        el.set_attr("title", "a \"b\" & c");
        el.append(Node::text("1 < 2 & 3"));
        el.append(Element::new("br"));
        insta::assert_snapshot!(
            el.to_html(),
            @r#"<p title="a &quot;b&quot; &amp; c">1 &lt; 2 &amp; 3<br></p>"#
        );
    }

    #[test]
    fn test_raw_text_elements_are_not_escaped() {
        let (dom, body) =
            Dom::parse_html("<p>x<style>a > b { color: red }</style>1 < 2</p>").unwrap();
        insta::assert_snapshot!(
            dom.inner_html(body),
            @"<p>x<style>a > b { color: red }</style>1 &lt; 2</p>"
        );

        let style = dom.node_at_path(body, &[0, 1]).unwrap();
        insta::assert_snapshot!(dom.inner_html(style), @"a > b { color: red }");
    }

    #[test]
    fn test_fragment_top_level_text() {
        let fragment = Fragment::from_nodes(vec![
            Node::text("a & b"),
            Element::new("br").into(),
            Node::Comment(" c ".into()),
        ]);
        insta::assert_snapshot!(fragment.to_html(), @"a &amp; b<br><!-- c -->");
    }
}
