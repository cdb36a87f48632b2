//! Boundary-point ranges.
//!
//! A [`Range`] is a pair of `(node, offset)` points, the same shape as the
//! browser's `Range`. Offsets inside text and comment nodes count characters;
//! offsets inside elements count children.

use std::cmp::Ordering;

use crate::dom::{Dom, NodeId};
use crate::node::{Fragment, Node};

/// A `(container, offset)` position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryPoint {
    pub node: NodeId,
    pub offset: usize,
}

impl BoundaryPoint {
    pub fn new(node: NodeId, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// A selection range between two boundary points.
///
/// `start` is expected to be at or before `end`; the selection layer that
/// builds ranges is responsible for ordering them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: BoundaryPoint,
    pub end: BoundaryPoint,
}

impl Range {
    pub fn new(start: BoundaryPoint, end: BoundaryPoint) -> Self {
        Self { start, end }
    }

    /// A range from `(start_node, start_offset)` to `(end_node, end_offset)`.
    pub fn between(
        start_node: NodeId,
        start_offset: usize,
        end_node: NodeId,
        end_offset: usize,
    ) -> Self {
        Self::new(
            BoundaryPoint::new(start_node, start_offset),
            BoundaryPoint::new(end_node, end_offset),
        )
    }

    /// A collapsed range (caret) at `point`.
    pub fn collapsed(point: BoundaryPoint) -> Self {
        Self::new(point, point)
    }

    /// A range covering everything inside `node`.
    pub fn select_node_contents(dom: &Dom, node: NodeId) -> Self {
        Self::between(node, 0, node, dom.node_length(node))
    }

    /// A range covering `node` itself, expressed in its parent.
    pub fn select_node(dom: &Dom, node: NodeId) -> Option<Self> {
        let parent = dom.parent(node)?;
        let idx = dom.index_in_parent(node)?;
        Some(Self::between(parent, idx, parent, idx + 1))
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// Deepest node containing both boundary points.
    ///
    /// `None` when the points live in disconnected trees.
    pub fn common_ancestor(&self, dom: &Dom) -> Option<NodeId> {
        common_ancestor(dom, self.start.node, self.end.node)
    }

    /// Whether `node` lies entirely inside the range.
    pub fn contains_node(&self, dom: &Dom, node: NodeId) -> bool {
        contains_node(dom, self.start, self.end, node)
    }

    /// Whether `node` is partially selected: an inclusive ancestor of exactly
    /// one of the two boundary containers.
    pub fn partially_contains_node(&self, dom: &Dom, node: NodeId) -> bool {
        dom.contains(node, self.start.node) != dom.contains(node, self.end.node)
    }

    /// Deep copy of everything the range selects.
    ///
    /// Partially selected text is cut to the selected characters, partially
    /// selected elements are copied shallowly and filled with their selected
    /// descendants, and fully contained nodes are copied whole. The document
    /// is never modified.
    pub fn clone_contents(&self, dom: &Dom) -> Fragment {
        Fragment::from_nodes(clone_between(dom, self.start, self.end))
    }
}

fn common_ancestor(dom: &Dom, a: NodeId, b: NodeId) -> Option<NodeId> {
    std::iter::once(a)
        .chain(dom.ancestors(a))
        .find(|&candidate| dom.contains(candidate, b))
}

/// The child of `ancestor` on the path down to `node`.
fn child_towards(dom: &Dom, ancestor: NodeId, node: NodeId) -> Option<NodeId> {
    std::iter::once(node)
        .chain(dom.ancestors(node))
        .find(|&n| dom.parent(n) == Some(ancestor))
}

/// Document order of two boundary points.
pub fn compare_points(dom: &Dom, a: BoundaryPoint, b: BoundaryPoint) -> Ordering {
    if a.node == b.node {
        return a.offset.cmp(&b.offset);
    }
    if dom.index_path(a.node) > dom.index_path(b.node) {
        return compare_points(dom, b, a).reverse();
    }
    // a.node precedes b.node in tree order.
    if dom.contains(a.node, b.node) {
        if let Some(child) = child_towards(dom, a.node, b.node) {
            if dom.index_in_parent(child).is_some_and(|idx| idx < a.offset) {
                return Ordering::Greater;
            }
        }
    }
    Ordering::Less
}

fn contains_node(dom: &Dom, start: BoundaryPoint, end: BoundaryPoint, node: NodeId) -> bool {
    let node_start = BoundaryPoint::new(node, 0);
    let node_end = BoundaryPoint::new(node, dom.node_length(node));
    compare_points(dom, node_start, start) == Ordering::Greater
        && compare_points(dom, node_end, end) == Ordering::Less
}

fn substring(text: &str, from: usize, to: usize) -> String {
    text.chars().skip(from).take(to.saturating_sub(from)).collect()
}

/// Character-data copy of `node` cut to `from..to`.
fn cut_character_data(dom: &Dom, node: NodeId, from: usize, to: usize) -> Option<Node> {
    let text = dom.character_data(node)?;
    let cut = substring(text, from, to);
    match dom.shallow_clone(node)? {
        Node::Comment(_) => Some(Node::Comment(cut)),
        _ => Some(Node::Text(cut)),
    }
}

fn clone_between(dom: &Dom, start: BoundaryPoint, end: BoundaryPoint) -> Vec<Node> {
    if start == end {
        return Vec::new();
    }

    if start.node == end.node && dom.is_character_data(start.node) {
        return cut_character_data(dom, start.node, start.offset, end.offset)
            .into_iter()
            .collect();
    }

    let Some(common) = common_ancestor(dom, start.node, end.node) else {
        return Vec::new();
    };

    let first_partial = if dom.contains(start.node, end.node) {
        None
    } else {
        child_towards(dom, common, start.node)
    };
    let last_partial = if dom.contains(end.node, start.node) {
        None
    } else {
        child_towards(dom, common, end.node)
    };

    let mut out = Vec::new();

    if let Some(first) = first_partial {
        let len = dom.node_length(first);
        if dom.is_character_data(first) {
            out.extend(cut_character_data(dom, first, start.offset, len));
        } else if let Some(mut clone) = dom.shallow_clone(first) {
            if let Node::Element(el) = &mut clone {
                el.children = clone_between(dom, start, BoundaryPoint::new(first, len));
            }
            out.push(clone);
        }
    }

    out.extend(
        dom.children(common)
            .iter()
            .filter(|&&child| contains_node(dom, start, end, child))
            .filter_map(|&child| dom.deep_clone(child)),
    );

    if let Some(last) = last_partial {
        if dom.is_character_data(last) {
            out.extend(cut_character_data(dom, last, 0, end.offset));
        } else if let Some(mut clone) = dom.shallow_clone(last) {
            if let Node::Element(el) = &mut clone {
                el.children = clone_between(dom, BoundaryPoint::new(last, 0), end);
            }
            out.push(clone);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `<p>ab<b>cd</b>ef</p><p>gh</p>` under the document node.
    struct Sample {
        dom: Dom,
        p1: NodeId,
        ab: NodeId,
        b: NodeId,
        cd: NodeId,
        ef: NodeId,
        gh: NodeId,
    }

    fn sample() -> Sample {
        let mut dom = Dom::new();
        let doc = dom.document();
        let p1 = dom.create_element("p");
        let ab = dom.create_text("ab");
        let b = dom.create_element("b");
        let cd = dom.create_text("cd");
        let ef = dom.create_text("ef");
        let p2 = dom.create_element("p");
        let gh = dom.create_text("gh");
        dom.append_child(doc, p1).unwrap();
        dom.append_child(p1, ab).unwrap();
        dom.append_child(p1, b).unwrap();
        dom.append_child(b, cd).unwrap();
        dom.append_child(p1, ef).unwrap();
        dom.append_child(doc, p2).unwrap();
        dom.append_child(p2, gh).unwrap();
        Sample {
            dom,
            p1,
            ab,
            b,
            cd,
            ef,
            gh,
        }
    }

    #[test]
    fn test_compare_points() {
        let s = sample();
        let dom = &s.dom;
        let pt = BoundaryPoint::new;
        assert_eq!(compare_points(dom, pt(s.ab, 1), pt(s.ab, 2)), Ordering::Less);
        assert_eq!(compare_points(dom, pt(s.cd, 0), pt(s.ab, 2)), Ordering::Greater);
        // (p1, 1) sits between "ab" and <b>.
        assert_eq!(compare_points(dom, pt(s.p1, 1), pt(s.cd, 0)), Ordering::Less);
        assert_eq!(compare_points(dom, pt(s.p1, 2), pt(s.cd, 0)), Ordering::Greater);
        assert_eq!(compare_points(dom, pt(s.cd, 0), pt(s.p1, 2)), Ordering::Less);
        assert_eq!(compare_points(dom, pt(s.gh, 0), pt(s.ef, 2)), Ordering::Greater);
    }

    #[test]
    fn test_common_ancestor() {
        let s = sample();
        let range = Range::between(s.ab, 1, s.cd, 1);
        assert_eq!(range.common_ancestor(&s.dom), Some(s.p1));

        let range = Range::between(s.cd, 0, s.cd, 2);
        assert_eq!(range.common_ancestor(&s.dom), Some(s.cd));

        let range = Range::between(s.ab, 0, s.gh, 1);
        assert_eq!(range.common_ancestor(&s.dom), Some(s.dom.document()));
    }

    #[test]
    fn test_contains_node() {
        let s = sample();
        let range = Range::between(s.ab, 1, s.ef, 1);
        assert!(range.contains_node(&s.dom, s.b));
        assert!(range.contains_node(&s.dom, s.cd));
        assert!(!range.contains_node(&s.dom, s.ab));
        assert!(!range.contains_node(&s.dom, s.p1));
        assert!(range.partially_contains_node(&s.dom, s.ab));
        assert!(!range.partially_contains_node(&s.dom, s.p1));
    }

    #[test]
    fn test_clone_contents_within_text() {
        let s = sample();
        let frag = Range::between(s.ab, 1, s.ab, 2).clone_contents(&s.dom);
        assert_eq!(frag.children, vec![Node::text("b")]);
    }

    #[test]
    fn test_clone_contents_partial_elements() {
        let s = sample();
        let frag = Range::between(s.cd, 1, s.gh, 1).clone_contents(&s.dom);
        // <p><b>d</b>ef</p><p>g</p>
        assert_eq!(frag.len(), 2);
        let p1 = frag.children[0].as_element().unwrap();
        assert_eq!(p1.tag, "p");
        assert_eq!(p1.children[0].tag(), Some("b"));
        assert_eq!(p1.children[0].text_content(), "d");
        assert_eq!(p1.children[1], Node::text("ef"));
        assert_eq!(frag.children[1].text_content(), "g");
    }

    #[test]
    fn test_clone_contents_collapsed_is_empty() {
        let s = sample();
        let frag = Range::collapsed(BoundaryPoint::new(s.cd, 1)).clone_contents(&s.dom);
        assert!(frag.is_empty());
    }

    #[test]
    fn test_clone_contents_element_offsets() {
        let s = sample();
        let frag = Range::select_node(&s.dom, s.b)
            .unwrap()
            .clone_contents(&s.dom);
        assert_eq!(frag.len(), 1);
        assert_eq!(frag.children[0].tag(), Some("b"));
        assert_eq!(frag.text_content(), "cd");
    }
}
