//! Element classification by tag name.
//!
//! The sets mirror the editor schema: anything that is not a block element
//! counts as inline.

use crate::dom::{Dom, NodeId, NodeKind};

pub fn is_block_tag(tag: &str) -> bool {
    matches!(
        tag,
        "article"
            | "aside"
            | "details"
            | "div"
            | "dt"
            | "figcaption"
            | "footer"
            | "form"
            | "fieldset"
            | "header"
            | "hgroup"
            | "html"
            | "main"
            | "nav"
            | "section"
            | "summary"
            | "body"
            | "p"
            | "dl"
            | "multicol"
            | "dd"
            | "figure"
            | "address"
            | "center"
            | "blockquote"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "listing"
            | "xmp"
            | "pre"
            | "plaintext"
            | "menu"
            | "dir"
            | "ul"
            | "ol"
            | "li"
            | "hr"
            | "table"
            | "tbody"
            | "thead"
            | "tfoot"
            | "th"
            | "tr"
            | "td"
            | "caption"
    )
}

pub fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

pub fn is_list_tag(tag: &str) -> bool {
    matches!(tag, "ul" | "ol" | "dl")
}

pub fn is_list_item_tag(tag: &str) -> bool {
    matches!(tag, "li" | "dd" | "dt")
}

pub fn is_table_cell_tag(tag: &str) -> bool {
    matches!(tag, "td" | "th")
}

fn tag_is(dom: &Dom, id: NodeId, pred: fn(&str) -> bool) -> bool {
    dom.tag(id).is_some_and(pred)
}

pub fn is_element(dom: &Dom, id: NodeId) -> bool {
    dom.element(id).is_some()
}

pub fn is_text(dom: &Dom, id: NodeId) -> bool {
    matches!(dom.kind(id), Some(NodeKind::Text(_)))
}

pub fn is_block(dom: &Dom, id: NodeId) -> bool {
    tag_is(dom, id, is_block_tag)
}

/// An element that is not a block. Text nodes are not inline elements.
pub fn is_inline(dom: &Dom, id: NodeId) -> bool {
    dom.tag(id).is_some_and(|tag| !is_block_tag(tag))
}

pub fn is_heading(dom: &Dom, id: NodeId) -> bool {
    tag_is(dom, id, is_heading_tag)
}

pub fn is_list(dom: &Dom, id: NodeId) -> bool {
    tag_is(dom, id, is_list_tag)
}

pub fn is_list_item(dom: &Dom, id: NodeId) -> bool {
    tag_is(dom, id, is_list_item_tag)
}

pub fn is_table_cell(dom: &Dom, id: NodeId) -> bool {
    tag_is(dom, id, is_table_cell_tag)
}

pub fn is_br(dom: &Dom, id: NodeId) -> bool {
    dom.tag(id) == Some("br")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        let mut dom = Dom::new();
        let strong = dom.create_element("strong");
        let h2 = dom.create_element("H2");
        let ul = dom.create_element("ul");
        let dl = dom.create_element("dl");
        let li = dom.create_element("li");
        let td = dom.create_element("td");
        let text = dom.create_text("x");

        assert!(is_inline(&dom, strong));
        assert!(!is_inline(&dom, h2));
        assert!(!is_inline(&dom, text));
        assert!(is_heading(&dom, h2));
        assert!(is_list(&dom, ul));
        assert!(is_list(&dom, dl));
        assert!(is_list_item(&dom, li));
        assert!(!is_list_item(&dom, ul));
        assert!(is_table_cell(&dom, td));
        assert!(is_block(&dom, td));
        assert!(is_text(&dom, text));
        assert!(!is_element(&dom, text));
    }
}
