//! Range inspection helpers.

use weaver_editor_dom::element_type::{is_br, is_text};
use weaver_editor_dom::{Dom, NodeId, Range};

/// Node where the range starts, if the start sits at a node boundary.
///
/// In a text node only offset 0 counts; in an element it's the child at the
/// offset.
fn start_node(dom: &Dom, rng: &Range) -> Option<NodeId> {
    let (container, offset) = (rng.start.node, rng.start.offset);
    if is_text(dom, container) {
        (offset == 0).then_some(container)
    } else {
        dom.child(container, offset)
    }
}

/// Node where the range ends, if the end sits at a node boundary.
fn end_node(dom: &Dom, rng: &Range) -> Option<NodeId> {
    let (container, offset) = (rng.end.node, rng.end.offset);
    if is_text(dom, container) {
        (offset == dom.node_length(container)).then_some(container)
    } else {
        offset.checked_sub(1).and_then(|i| dom.child(container, i))
    }
}

/// `node`, its first child, that child's first child, and so on.
fn first_children(dom: &Dom, node: NodeId) -> Vec<NodeId> {
    let mut chain = vec![node];
    let mut current = node;
    while let Some(child) = dom.first_child(current) {
        chain.push(child);
        current = child;
    }
    chain
}

/// `node` and its chain of last children.
///
/// A trailing `<br>` is padding, so the walk continues into its previous
/// sibling instead. A lone `<br>` yields an empty chain.
fn last_children(dom: &Dom, node: NodeId) -> Vec<NodeId> {
    match dom.last_child(node) {
        None => vec![node],
        Some(child) if is_br(dom, child) => match dom.previous_sibling(child) {
            Some(sibling) => {
                let mut chain = vec![node];
                chain.extend(last_children(dom, sibling));
                chain
            }
            None => Vec::new(),
        },
        Some(child) => {
            let mut chain = vec![node];
            chain.extend(last_children(dom, child));
            chain
        }
    }
}

/// Whether `rng` covers everything inside `elm`, from its first leaf to its
/// last (ignoring a trailing `<br>`).
pub fn has_all_contents_selected(dom: &Dom, elm: NodeId, rng: &Range) -> bool {
    let (Some(start), Some(end)) = (start_node(dom, rng), end_node(dom, rng)) else {
        return false;
    };
    first_children(dom, elm).contains(&start) && last_children(dom, elm).contains(&end)
}

/// The single node a range selects, as produced when a whole element is
/// selected (e.g. one table cell per range).
pub fn selected_node(dom: &Dom, rng: &Range) -> Option<NodeId> {
    let container = rng.start.node;
    if dom.has_children(container) && rng.end.offset == rng.start.offset + 1 {
        dom.child(container, rng.start.offset)
    } else {
        None
    }
}

pub fn selected_nodes(dom: &Dom, ranges: &[Range]) -> Vec<NodeId> {
    ranges
        .iter()
        .filter_map(|rng| selected_node(dom, rng))
        .collect()
}
