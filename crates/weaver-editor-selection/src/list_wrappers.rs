//! List shells for selections inside lists.
//!
//! Copying the text of a list item on its own would lose the list. When the
//! selection covers a whole item, a fresh `li` + list pair is rebuilt around
//! it; when the selection merely starts and ends inside one item or list,
//! that item/list is reused as the wrapper.

use weaver_editor_dom::element_type::{is_list, is_list_item};
use weaver_editor_dom::{Dom, Element, NodeId, Range};

use crate::selection_utils::has_all_contents_selected;

/// Style properties carried over from a list container onto its shell.
pub const LIST_STYLE_PREFIX: &str = "list-style";

fn find_parent_list_container(dom: &Dom, parents: &[NodeId]) -> Option<NodeId> {
    parents
        .iter()
        .copied()
        .find(|&elm| matches!(dom.tag(elm), Some("ul" | "ol")))
}

/// New `[li, list]` shells when some `li` in `parents` is fully selected.
///
/// The list shell takes the tag of the nearest `ul`/`ol` in `parents` and
/// only its `list-style*` properties. Empty when no item is fully selected
/// or no list container is found.
pub fn fully_selected_list_wrappers(dom: &Dom, parents: &[NodeId], rng: &Range) -> Vec<Element> {
    let fully_selected = parents
        .iter()
        .any(|&elm| dom.tag(elm) == Some("li") && has_all_contents_selected(dom, elm, rng));
    if !fully_selected {
        return Vec::new();
    }

    let Some(list) = find_parent_list_container(dom, parents) else {
        return Vec::new();
    };
    let Some(tag) = dom.tag(list) else {
        return Vec::new();
    };

    let mut list_elm = Element::new(tag);
    if let Some(style) = dom.style(list) {
        list_elm
            .style
            .set_all(&style.filter(|name, _| name.starts_with(LIST_STYLE_PREFIX)));
    }

    tracing::trace!(
        list_tag = tag,
        kept_styles = list_elm.style.len(),
        "fully_selected_list_wrappers: rebuilding list shells"
    );

    vec![Element::new("li"), list_elm]
}

/// Wrappers taken directly from the common ancestor container.
///
/// A list item inside a list gives `[item, list]`; a list gives `[list]`.
/// The caller shallow-copies these before use.
pub fn direct_list_wrappers(dom: &Dom, common_ancestor: NodeId) -> Vec<NodeId> {
    if is_list_item(dom, common_ancestor) {
        match dom.parent(common_ancestor).filter(|&p| is_list(dom, p)) {
            Some(list) => vec![common_ancestor, list],
            None => Vec::new(),
        }
    } else if is_list(dom, common_ancestor) {
        vec![common_ancestor]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weaver_editor_dom::parents_and_self;

    fn parse(html: &str) -> (Dom, NodeId) {
        Dom::parse_html(html).unwrap()
    }

    #[test]
    fn test_fully_selected_item_rebuilds_shells() {
        let (dom, body) = parse(
            "<ol class=\"steps\" style=\"list-style-type: upper-roman; margin-left: 2em; list-style-position: inside\"><li>one</li><li>two</li></ol>",
        );
        let ol = dom.node_at_path(body, &[0]).unwrap();
        let li = dom.node_at_path(body, &[0, 0]).unwrap();
        let text = dom.node_at_path(body, &[0, 0, 0]).unwrap();

        let rng = Range::between(text, 0, text, 3);
        let parents = parents_and_self(&dom, text, body);
        assert_eq!(parents, vec![text, li, ol]);

        let wrappers = fully_selected_list_wrappers(&dom, &parents, &rng);
        assert_eq!(wrappers.len(), 2);
        assert_eq!(wrappers[0], Element::new("li"));
        assert_eq!(wrappers[1].tag, "ol");
        assert!(wrappers[1].attrs.is_empty());
        assert_eq!(
            wrappers[1].style.to_css(),
            "list-style-type: upper-roman; list-style-position: inside;"
        );
    }

    #[test]
    fn test_partial_item_gets_no_shells() {
        let (dom, body) = parse("<ul><li>one</li></ul>");
        let text = dom.node_at_path(body, &[0, 0, 0]).unwrap();
        let rng = Range::between(text, 1, text, 3);
        let parents = parents_and_self(&dom, text, body);
        assert!(fully_selected_list_wrappers(&dom, &parents, &rng).is_empty());
    }

    #[test]
    fn test_item_without_list_container() {
        let (dom, body) = parse("<div><li>one</li></div>");
        let text = dom.node_at_path(body, &[0, 0, 0]).unwrap();
        let rng = Range::between(text, 0, text, 3);
        let parents = parents_and_self(&dom, text, body);
        assert!(fully_selected_list_wrappers(&dom, &parents, &rng).is_empty());
    }

    #[test]
    fn test_direct_wrappers() {
        let (dom, body) = parse("<ul><li>a<b>b</b></li></ul><div><li>x</li></div>");
        let ul = dom.node_at_path(body, &[0]).unwrap();
        let li = dom.node_at_path(body, &[0, 0]).unwrap();
        let div = dom.node_at_path(body, &[1]).unwrap();
        let stray_li = dom.node_at_path(body, &[1, 0]).unwrap();

        assert_eq!(direct_list_wrappers(&dom, li), vec![li, ul]);
        assert_eq!(direct_list_wrappers(&dom, ul), vec![ul]);
        assert!(direct_list_wrappers(&dom, stray_li).is_empty());
        assert!(direct_list_wrappers(&dom, div).is_empty());
    }
}
