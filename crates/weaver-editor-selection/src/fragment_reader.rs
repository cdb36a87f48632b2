//! Read the current selection out of the document as a standalone fragment.
//!
//! Two shapes of selection are handled:
//!
//! - **Cell selections** (marked cells, or one range per cell) become a new
//!   table holding just the selected rectangle.
//! - **Range selections** clone the range contents and rebuild the context
//!   they lose: inline formatting, headings and list structure around the
//!   common ancestor are shallow-copied and wrapped around the clone.
//!
//! Extraction never fails. Anything that cannot be extracted yields an empty
//! fragment, and the document is only ever read.

use weaver_editor_dom::element_type::{is_heading, is_inline};
use weaver_editor_dom::{Dom, Element, Fragment, NodeId, Range, ancestor_by_tag, parents_and_self};

use crate::list_wrappers::{direct_list_wrappers, fully_selected_list_wrappers};
use crate::table_cell_selection::cells_from_element_or_ranges;
use crate::table_model::TableModel;

/// Nest `inner` in `wrappers`, innermost first.
///
/// With no wrappers the content is returned as-is; otherwise the outermost
/// wrapper is the fragment's single root.
fn wrap(inner: Fragment, wrappers: Vec<Element>) -> Fragment {
    let mut wrappers = wrappers.into_iter();
    let Some(mut acc) = wrappers.next() else {
        return inner;
    };
    acc.extend(inner.into_nodes());
    for mut wrapper in wrappers {
        wrapper.append(acc);
        acc = wrapper;
    }
    Fragment::from_elements([acc])
}

/// Shallow copies of the elements to rebuild around the range contents.
fn wrap_elements(dom: &Dom, root: NodeId, rng: &Range, common: NodeId) -> Vec<Element> {
    let parents = parents_and_self(dom, common, root);

    let mut wrappers: Vec<Element> = parents
        .iter()
        .copied()
        .filter(|&elm| is_inline(dom, elm) || is_heading(dom, elm))
        .filter_map(|elm| dom.shallow_clone_element(elm))
        .collect();
    let formatting = wrappers.len();

    let list_shells = fully_selected_list_wrappers(dom, &parents, rng);
    if list_shells.is_empty() {
        wrappers.extend(
            direct_list_wrappers(dom, common)
                .into_iter()
                .filter_map(|elm| dom.shallow_clone_element(elm)),
        );
    } else {
        wrappers.extend(list_shells);
    }

    tracing::trace!(
        formatting,
        list = wrappers.len() - formatting,
        "wrap_elements: collected wrappers"
    );
    wrappers
}

/// Clone what `rng` selects, wrapped in the context it sits in.
pub fn extract_from_range(dom: &Dom, root: NodeId, rng: &Range) -> Fragment {
    if rng.is_collapsed() {
        return Fragment::empty();
    }
    let Some(common) = rng.common_ancestor(dom) else {
        tracing::debug!("extract_from_range: range spans disconnected trees");
        return Fragment::empty();
    };

    let wrappers = wrap_elements(dom, root, rng, common);
    wrap(rng.clone_contents(dom), wrappers)
}

/// A new table holding the rectangle covered by `cells`.
///
/// Empty when the first cell has no enclosing table below `root`, or when
/// the cells do not form a whole rectangle of the table grid.
pub fn extract_table_fragment(dom: &Dom, root: NodeId, cells: &[NodeId]) -> Fragment {
    let Some(&first) = cells.first() else {
        return Fragment::empty();
    };
    let Some(table) = ancestor_by_tag(dom, first, "table", Some(root)) else {
        tracing::debug!(cell = %first, "extract_table_fragment: no enclosing table");
        return Fragment::empty();
    };

    let model = TableModel::from_dom(dom, table);
    match model.rectangular_subsection(cells) {
        Some(section) => {
            tracing::trace!(
                rows = section.rows.len(),
                width = section.width,
                "extract_table_fragment: built sub-table"
            );
            Fragment::from_elements([section.to_dom(dom)])
        }
        None => {
            tracing::debug!(
                cells = cells.len(),
                %table,
                "extract_table_fragment: selection is not a rectangle"
            );
            Fragment::empty()
        }
    }
}

/// Read the selection described by `ranges` under `root`.
///
/// A cell selection takes precedence. Otherwise only the first range is
/// read; further ranges are ignored.
pub fn read(dom: &Dom, root: NodeId, ranges: &[Range]) -> Fragment {
    let cells = cells_from_element_or_ranges(dom, ranges, root);
    if !cells.is_empty() {
        tracing::trace!(cells = cells.len(), "read: table cell selection");
        return extract_table_fragment(dom, root, &cells);
    }

    match ranges.first() {
        Some(rng) => extract_from_range(dom, root, rng),
        None => Fragment::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weaver_editor_dom::Node;

    #[test]
    fn test_wrap_nests_innermost_first() {
        let inner = Fragment::from_nodes(vec![Node::text("a"), Node::text("b")]);
        let wrapped = wrap(inner, vec![Element::new("b"), Element::new("i"), Element::new("h1")]);
        assert_eq!(wrapped.len(), 1);
        insta::assert_snapshot!(wrapped.to_html(), @"<h1><i><b>ab</b></i></h1>");
    }

    #[test]
    fn test_wrap_without_wrappers_keeps_content() {
        let inner = Fragment::from_nodes(vec![Node::text("a"), Element::new("br").into()]);
        let wrapped = wrap(inner.clone(), Vec::new());
        assert_eq!(wrapped, inner);
    }

    #[test]
    fn test_extract_partial_list_item_uses_direct_wrappers() {
        let (dom, body) =
            Dom::parse_html("<ul class=\"x\"><li id=\"i\">he<b>ll</b>o!</li></ul>").unwrap();
        let he = dom.node_at_path(body, &[0, 0, 0]).unwrap();
        let o = dom.node_at_path(body, &[0, 0, 2]).unwrap();
        let frag = extract_from_range(&dom, body, &Range::between(he, 1, o, 1));
        insta::assert_snapshot!(
            frag.to_html(),
            @r#"<ul class="x"><li id="i">e<b>ll</b>o</li></ul>"#
        );
    }

    #[test]
    fn test_extract_inside_one_text_node_has_no_list_wrappers() {
        let (dom, body) = Dom::parse_html("<ul><li>hello</li></ul>").unwrap();
        let text = dom.node_at_path(body, &[0, 0, 0]).unwrap();
        let frag = extract_from_range(&dom, body, &Range::between(text, 1, text, 3));
        insta::assert_snapshot!(frag.to_html(), @"el");
    }

    #[test]
    fn test_extract_across_items_wraps_list() {
        let (dom, body) = Dom::parse_html("<ol start=\"3\"><li>one</li><li>two</li></ol>").unwrap();
        let one = dom.node_at_path(body, &[0, 0, 0]).unwrap();
        let two = dom.node_at_path(body, &[0, 1, 0]).unwrap();
        let frag = extract_from_range(&dom, body, &Range::between(one, 1, two, 2));
        insta::assert_snapshot!(
            frag.to_html(),
            @r#"<ol start="3"><li>ne</li><li>tw</li></ol>"#
        );
    }

    #[test]
    fn test_extract_stops_at_root() {
        let (dom, body) = Dom::parse_html("<b><i id=\"root\">abc</i></b>").unwrap();
        let root = dom.node_at_path(body, &[0, 0]).unwrap();
        let text = dom.node_at_path(root, &[0]).unwrap();
        let frag = extract_from_range(&dom, root, &Range::between(text, 0, text, 2));
        insta::assert_snapshot!(frag.to_html(), @"ab");
    }

    #[test]
    fn test_table_fragment_without_cells_or_table() {
        let (dom, body) = Dom::parse_html("<p>x</p>").unwrap();
        let p = dom.node_at_path(body, &[0]).unwrap();
        assert!(extract_table_fragment(&dom, body, &[]).is_empty());
        assert!(extract_table_fragment(&dom, body, &[p]).is_empty());
    }

    #[test]
    fn test_read_without_ranges() {
        let (dom, body) = Dom::parse_html("<p>x</p>").unwrap();
        assert!(read(&dom, body, &[]).is_empty());
    }
}
