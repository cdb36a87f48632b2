//! Which table cells make up the current cell selection.

use weaver_editor_dom::element_type::is_table_cell;
use weaver_editor_dom::{Dom, NodeId, Range};

use crate::selection_utils::selected_nodes;

/// Attribute the table plugin puts on every cell of a multi-cell selection.
pub const SELECTED_CELL_ATTR: &str = "data-mce-selected";

/// Marked `td`/`th` descendants of `root`, in document order.
pub fn cells_from_element(dom: &Dom, root: NodeId) -> Vec<NodeId> {
    dom.descendants(root)
        .into_iter()
        .filter(|&n| is_table_cell(dom, n) && dom.has_attribute(n, SELECTED_CELL_ATTR))
        .collect()
}

/// Cells selected one per range, the way Gecko reports cell selections.
pub fn cells_from_ranges(dom: &Dom, ranges: &[Range]) -> Vec<NodeId> {
    selected_nodes(dom, ranges)
        .into_iter()
        .filter(|&n| is_table_cell(dom, n))
        .collect()
}

/// Marked cells under `root` if there are any, otherwise the cells the
/// ranges select.
pub fn cells_from_element_or_ranges(dom: &Dom, ranges: &[Range], root: NodeId) -> Vec<NodeId> {
    let marked = cells_from_element(dom, root);
    if !marked.is_empty() {
        return marked;
    }
    cells_from_ranges(dom, ranges)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "<table><tr><td>a</td><td data-mce-selected=\"1\">b</td></tr>\
        <tr><th data-mce-selected=\"1\">c</th><td>d</td></tr></table>";

    fn cells(dom: &Dom, body: NodeId) -> Vec<NodeId> {
        dom.descendants(body)
            .into_iter()
            .filter(|&n| is_table_cell(dom, n))
            .collect()
    }

    #[test]
    fn test_marked_cells_win() {
        let (dom, body) = Dom::parse_html(TABLE).unwrap();
        let all = cells(&dom, body);
        let a = all[0];
        let ranges = [Range::select_node(&dom, a).unwrap()];

        assert_eq!(cells_from_element(&dom, body), vec![all[1], all[2]]);
        assert_eq!(cells_from_element_or_ranges(&dom, &ranges, body), vec![all[1], all[2]]);
    }

    #[test]
    fn test_falls_back_to_ranges() {
        let (dom, body) =
            Dom::parse_html("<table><tr><td>a</td><td>b</td><td>c</td></tr></table><p>x</p>")
                .unwrap();
        let all = cells(&dom, body);
        let p_text = dom.node_at_path(body, &[1, 0]).unwrap();
        let ranges = [
            Range::select_node(&dom, all[0]).unwrap(),
            Range::between(p_text, 0, p_text, 1),
            Range::select_node(&dom, all[2]).unwrap(),
        ];

        assert!(cells_from_element(&dom, body).is_empty());
        assert_eq!(cells_from_element_or_ranges(&dom, &ranges, body), vec![all[0], all[2]]);
    }

    #[test]
    fn test_selected_non_cell_is_ignored() {
        let (dom, body) = Dom::parse_html("<p><b>x</b></p>").unwrap();
        let b = dom.node_at_path(body, &[0, 0]).unwrap();
        let ranges = [Range::select_node(&dom, b).unwrap()];
        assert!(cells_from_element_or_ranges(&dom, &ranges, body).is_empty());
    }
}
