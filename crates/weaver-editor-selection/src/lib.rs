//! Selection layer for the weaver editor.
//!
//! Turns a set of ranges over a [`Dom`](weaver_editor_dom::Dom) into a
//! detached [`Fragment`](weaver_editor_dom::Fragment) that can stand on its
//! own: copied inline formatting, headings and list shells are rebuilt
//! around the selected content, and cell selections become a new table.
//!
//! # Architecture
//!
//! - `fragment_reader`: entry point, picks between range and table extraction
//! - `list_wrappers`: list item / list container shells for list selections
//! - `selection_utils`: full-coverage checks and selected-node lookup
//! - `table_cell_selection`: resolving which cells form a cell selection
//! - `table_model`: logical row/column model of a table, sub-sections

// Re-export the DOM crate
pub use weaver_editor_dom;

pub mod fragment_reader;
pub mod list_wrappers;
pub mod selection_utils;
pub mod table_cell_selection;
pub mod table_model;

pub use fragment_reader::{extract_from_range, extract_table_fragment, read};
pub use list_wrappers::{LIST_STYLE_PREFIX, direct_list_wrappers, fully_selected_list_wrappers};
pub use selection_utils::{has_all_contents_selected, selected_node, selected_nodes};
pub use table_cell_selection::{
    SELECTED_CELL_ATTR, cells_from_element, cells_from_element_or_ranges, cells_from_ranges,
};
pub use table_model::{Bounds, CellPosition, RowModel, Slot, TableModel};
