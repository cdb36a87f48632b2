//! Ancestor chains bounded by a root element.
//!
//! Selection code never looks past the editing root, so every walk here
//! stops at `root` and never returns it.

use crate::dom::{Dom, NodeId};

/// Ancestors of `start`, nearest first, up to but excluding the first one
/// that is `root` or satisfies `stop`.
///
/// Empty when `start` is `root` or not inside it.
pub fn parents_until(
    dom: &Dom,
    start: NodeId,
    root: NodeId,
    mut stop: impl FnMut(&Dom, NodeId) -> bool,
) -> Vec<NodeId> {
    if start == root || !dom.contains(root, start) {
        return Vec::new();
    }
    dom.ancestors(start)
        .take_while(|&anc| anc != root && !stop(dom, anc))
        .collect()
}

/// Ancestors strictly between `start` and `root`, nearest first.
pub fn parents(dom: &Dom, start: NodeId, root: NodeId) -> Vec<NodeId> {
    parents_until(dom, start, root, |_, _| false)
}

/// `start` followed by [`parents`].
pub fn parents_and_self(dom: &Dom, start: NodeId, root: NodeId) -> Vec<NodeId> {
    let mut chain = vec![start];
    chain.extend(parents(dom, start, root));
    chain
}

/// Nearest ancestor of `node` with the given tag.
///
/// The walk checks each ancestor against `tag` before checking whether it
/// is `root`, so `root` itself can match but nothing above it can.
pub fn ancestor_by_tag(dom: &Dom, node: NodeId, tag: &str, root: Option<NodeId>) -> Option<NodeId> {
    for anc in dom.ancestors(node) {
        if dom.tag(anc) == Some(tag) {
            return Some(anc);
        }
        if Some(anc) == root {
            break;
        }
    }
    None
}
