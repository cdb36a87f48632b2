//! Logical grid model of an HTML table.
//!
//! The DOM only says which cells sit in which row; `rowspan` and `colspan`
//! decide where they actually land. [`TableModel::from_dom`] lays every cell
//! out on a grid so selections can be cut by row/column, and
//! [`TableModel::to_dom`] turns a (sub-)model back into a standalone table.

use std::collections::{HashMap, HashSet};

use weaver_editor_dom::element_type::is_table_cell;
use weaver_editor_dom::{Dom, Element, NodeId, ancestor_by_tag};

/// Largest spans honoured, as in the HTML table processing model.
const MAX_COLSPAN: usize = 1000;
const MAX_ROWSPAN: usize = 65534;

/// A grid coordinate: column `x`, row `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellPosition {
    pub x: usize,
    pub y: usize,
}

impl CellPosition {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Inclusive rectangle of grid slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub start: CellPosition,
    pub end: CellPosition,
}

impl Bounds {
    fn around(a: CellPosition, b: CellPosition) -> Self {
        Self {
            start: CellPosition::new(a.x.min(b.x), a.y.min(b.y)),
            end: CellPosition::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    fn union(self, other: Bounds) -> Self {
        Self {
            start: CellPosition::new(
                self.start.x.min(other.start.x),
                self.start.y.min(other.start.y),
            ),
            end: CellPosition::new(self.end.x.max(other.end.x), self.end.y.max(other.end.y)),
        }
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        (self.start.x..=self.end.x).contains(&pos.x) && (self.start.y..=self.end.y).contains(&pos.y)
    }

    pub fn width(&self) -> usize {
        self.end.x - self.start.x + 1
    }

    pub fn height(&self) -> usize {
        self.end.y - self.start.y + 1
    }
}

/// One grid slot. `origin` is false for slots a spanning cell fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub cell: NodeId,
    pub origin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowModel {
    /// The `tr` whose attributes the rebuilt row takes.
    pub element: NodeId,
    /// Slots by column. `None` where no cell reaches.
    pub cells: Vec<Option<Slot>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableModel {
    /// The `table` whose attributes the rebuilt table takes.
    pub element: NodeId,
    /// Length of the longest row.
    pub width: usize,
    pub rows: Vec<RowModel>,
}

fn span(dom: &Dom, cell: NodeId, name: &str, max: usize) -> usize {
    dom.attribute(cell, name)
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .map_or(1, |n| n.min(max))
}

/// `tr` elements belonging to `table`, skipping rows of nested tables.
fn table_rows(dom: &Dom, table: NodeId) -> Vec<NodeId> {
    dom.descendants(table)
        .into_iter()
        .filter(|&n| dom.tag(n) == Some("tr") && ancestor_by_tag(dom, n, "table", None) == Some(table))
        .collect()
}

fn row_cells(dom: &Dom, tr: NodeId) -> Vec<NodeId> {
    dom.children(tr)
        .iter()
        .copied()
        .filter(|&c| is_table_cell(dom, c))
        .collect()
}

fn row_width(rows: &[RowModel]) -> usize {
    rows.iter().map(|r| r.cells.len()).max().unwrap_or(0)
}

impl TableModel {
    /// Lay out the cells of `table` on a grid.
    ///
    /// Each cell goes to the first free column at or after its index in the
    /// row, then fills `rowspan × colspan` slots. Missing or invalid spans
    /// count as 1.
    pub fn from_dom(dom: &Dom, table: NodeId) -> Self {
        let mut rows: Vec<RowModel> = Vec::new();

        for (y, tr) in table_rows(dom, table).into_iter().enumerate() {
            match rows.get_mut(y) {
                Some(row) => row.element = tr,
                None => rows.push(RowModel {
                    element: tr,
                    cells: Vec::new(),
                }),
            }

            for (x, td) in row_cells(dom, tr).into_iter().enumerate() {
                let x = skip_filled(&rows, x, y);
                fill(
                    &mut rows,
                    CellPosition::new(x, y),
                    tr,
                    td,
                    span(dom, td, "rowspan", MAX_ROWSPAN),
                    span(dom, td, "colspan", MAX_COLSPAN),
                );
            }
        }

        Self {
            element: table,
            width: row_width(&rows),
            rows,
        }
    }

    pub fn slot(&self, pos: CellPosition) -> Option<Slot> {
        self.rows.get(pos.y)?.cells.get(pos.x).copied().flatten()
    }

    /// Grid position where `cell` starts.
    pub fn position_of(&self, cell: NodeId) -> Option<CellPosition> {
        self.rows.iter().enumerate().find_map(|(y, row)| {
            row.cells
                .iter()
                .position(|slot| matches!(slot, Some(s) if s.cell == cell && s.origin))
                .map(|x| CellPosition::new(x, y))
        })
    }

    /// Every slot `cell` occupies, spans included.
    pub fn extent_of(&self, cell: NodeId) -> Option<Bounds> {
        self.slots()
            .filter(|(_, slot)| slot.cell == cell)
            .map(|(pos, _)| Bounds::around(pos, pos))
            .reduce(Bounds::union)
    }

    /// Extents of every cell, gathered in one pass over the grid.
    fn extents(&self) -> HashMap<NodeId, Bounds> {
        let mut extents: HashMap<NodeId, Bounds> = HashMap::new();
        for (pos, slot) in self.slots() {
            extents
                .entry(slot.cell)
                .and_modify(|b| *b = b.union(Bounds::around(pos, pos)))
                .or_insert_with(|| Bounds::around(pos, pos));
        }
        extents
    }

    fn slots(&self) -> impl Iterator<Item = (CellPosition, Slot)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.cells
                .iter()
                .enumerate()
                .filter_map(move |(x, slot)| slot.map(|s| (CellPosition::new(x, y), s)))
        })
    }

    /// Smallest rectangle covering every slot of every cell in `cells`.
    pub fn bounds_of(&self, cells: &[NodeId]) -> Option<Bounds> {
        Self::bounds_in(&self.extents(), cells)
    }

    fn bounds_in(extents: &HashMap<NodeId, Bounds>, cells: &[NodeId]) -> Option<Bounds> {
        cells
            .iter()
            .map(|cell| extents.get(cell).copied())
            .try_fold(None::<Bounds>, |acc, extent| {
                let extent = extent?;
                Some(Some(acc.map_or(extent, |b| b.union(extent))))
            })
            .flatten()
    }

    /// Whether some cell has slots both inside and outside `bounds`.
    fn straddles(&self, extents: &HashMap<NodeId, Bounds>, bounds: Bounds) -> bool {
        self.slots()
            .filter(|(pos, _)| bounds.contains(*pos))
            .any(|(_, slot)| {
                extents.get(&slot.cell).is_some_and(|extent| {
                    !bounds.contains(extent.start) || !bounds.contains(extent.end)
                })
            })
    }

    /// Whether `cells` cover their bounding rectangle exactly: every slot in
    /// it belongs to one of `cells`, with no gaps.
    pub fn is_rectangular(&self, cells: &[NodeId]) -> bool {
        self.bounds_of(cells)
            .is_some_and(|bounds| self.covers(bounds, cells))
    }

    fn covers(&self, bounds: Bounds, cells: &[NodeId]) -> bool {
        let cells: HashSet<NodeId> = cells.iter().copied().collect();
        (bounds.start.y..=bounds.end.y).all(|y| {
            (bounds.start.x..=bounds.end.x).all(|x| {
                self.slot(CellPosition::new(x, y))
                    .is_some_and(|slot| cells.contains(&slot.cell))
            })
        })
    }

    /// The sub-table spanned by `first` and `last`, in either order.
    ///
    /// `None` when either cell is not in the table, or when a spanning cell
    /// would be cut by the rectangle's edge.
    pub fn subsection(&self, first: NodeId, last: NodeId) -> Option<TableModel> {
        let extents = self.extents();
        let bounds = Self::bounds_in(&extents, &[first, last])?;
        self.section(&extents, bounds)
    }

    /// The sub-table covered by a rectangular cell selection.
    pub fn rectangular_subsection(&self, cells: &[NodeId]) -> Option<TableModel> {
        let extents = self.extents();
        let bounds = Self::bounds_in(&extents, cells)?;
        if !self.covers(bounds, cells) {
            return None;
        }
        self.section(&extents, bounds)
    }

    fn section(&self, extents: &HashMap<NodeId, Bounds>, bounds: Bounds) -> Option<TableModel> {
        if self.straddles(extents, bounds) {
            return None;
        }

        let rows: Vec<RowModel> = self
            .rows
            .get(bounds.start.y..=bounds.end.y)?
            .iter()
            .map(|row| RowModel {
                element: row.element,
                cells: row
                    .cells
                    .iter()
                    .skip(bounds.start.x)
                    .take(bounds.width())
                    .copied()
                    .collect(),
            })
            .collect();

        Some(TableModel {
            element: self.element,
            width: row_width(&rows),
            rows,
        })
    }

    /// Build a standalone table from the model.
    ///
    /// The table and rows are shallow copies of their originals, all rows go
    /// into one new `tbody`, and every slot becomes its own cell: origins are
    /// deep copies, span fillers empty shallow copies. Spans are dropped.
    pub fn to_dom(&self, dom: &Dom) -> Element {
        let mut table = dom
            .shallow_clone_element(self.element)
            .unwrap_or_else(|| Element::new("table"));
        let mut tbody = Element::new("tbody");

        for row in &self.rows {
            let mut tr = dom
                .shallow_clone_element(row.element)
                .unwrap_or_else(|| Element::new("tr"));
            for slot in row.cells.iter().flatten() {
                let cell = if slot.origin {
                    dom.deep_clone_element(slot.cell)
                } else {
                    dom.shallow_clone_element(slot.cell)
                };
                if let Some(mut td) = cell {
                    td.remove_attr("colspan");
                    td.remove_attr("rowspan");
                    tr.append(td);
                }
            }
            tbody.append(tr);
        }

        table.append(tbody);
        table
    }
}

fn skip_filled(rows: &[RowModel], mut x: usize, y: usize) -> usize {
    while rows
        .get(y)
        .and_then(|row| row.cells.get(x))
        .is_some_and(Option::is_some)
    {
        x += 1;
    }
    x
}

fn fill(
    rows: &mut Vec<RowModel>,
    at: CellPosition,
    tr: NodeId,
    td: NodeId,
    rowspan: usize,
    colspan: usize,
) {
    for y in at.y..at.y + rowspan {
        if rows.len() <= y {
            rows.resize_with(y + 1, || RowModel {
                element: tr,
                cells: Vec::new(),
            });
        }
        let cells = &mut rows[y].cells;
        for x in at.x..at.x + colspan {
            if cells.len() <= x {
                cells.resize(x + 1, None);
            }
            cells[x] = Some(Slot {
                cell: td,
                origin: x == at.x && y == at.y,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(html: &str) -> (Dom, NodeId) {
        let (dom, body) = Dom::parse_html(html).unwrap();
        let table = dom
            .descendants(body)
            .into_iter()
            .find(|&n| dom.tag(n) == Some("table"))
            .unwrap();
        (dom, table)
    }

    fn cell(dom: &Dom, text: &str) -> NodeId {
        dom.descendants(dom.document())
            .into_iter()
            .find(|&n| is_table_cell(dom, n) && dom.text_content(n) == text)
            .unwrap()
    }

    /// Grid of cell texts, `-` for span fillers and `.` for holes.
    fn grid(dom: &Dom, model: &TableModel) -> Vec<String> {
        model
            .rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|slot| match slot {
                        Some(s) if s.origin => dom.text_content(s.cell),
                        Some(_) => "-".to_string(),
                        None => ".".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    const SPANS: &str = "<table>\
        <tr><td rowspan=\"2\">a</td><td colspan=\"2\">b</td></tr>\
        <tr><td>c</td><td>d</td></tr>\
        <tr><td>e</td><td>f</td><td>g</td></tr>\
        </table>";

    #[test]
    fn test_from_dom_places_spans() {
        let (dom, table) = parse(SPANS);
        let model = TableModel::from_dom(&dom, table);
        assert_eq!(model.width, 3);
        assert_eq!(grid(&dom, &model), vec!["a b -", "- c d", "e f g"]);
        assert_eq!(model.position_of(cell(&dom, "c")), Some(CellPosition::new(1, 1)));
        assert_eq!(
            model.extent_of(cell(&dom, "b")),
            Some(Bounds {
                start: CellPosition::new(1, 0),
                end: CellPosition::new(2, 0)
            })
        );
    }

    #[test]
    fn test_invalid_spans_count_as_one() {
        let (dom, table) = parse(
            "<table><tr><td colspan=\"x\">a</td><td rowspan=\"0\">b</td></tr><tr><td>c</td></tr></table>",
        );
        let model = TableModel::from_dom(&dom, table);
        assert_eq!(grid(&dom, &model), vec!["a b", "c"]);
    }

    #[test]
    fn test_nested_table_rows_are_skipped() {
        let (dom, table) = parse(
            "<table><tr><td>a<table><tr><td>inner</td></tr></table></td><td>b</td></tr></table>",
        );
        let model = TableModel::from_dom(&dom, table);
        assert_eq!(model.rows.len(), 1);
        assert_eq!(model.width, 2);
    }

    #[test]
    fn test_subsection_either_order() {
        let (dom, table) = parse(SPANS);
        let model = TableModel::from_dom(&dom, table);
        let sub = model.subsection(cell(&dom, "g"), cell(&dom, "c")).unwrap();
        assert_eq!(grid(&dom, &sub), vec!["c d", "f g"]);
        assert_eq!(sub.width, 2);
    }

    #[test]
    fn test_subsection_rejects_cut_spans() {
        let (dom, table) = parse(SPANS);
        let model = TableModel::from_dom(&dom, table);
        assert!(model.subsection(cell(&dom, "d"), cell(&dom, "g")).is_some());
        // "a" spans rows 0-1, so a box over rows 1-2 would cut it.
        assert!(model.subsection(cell(&dom, "c"), cell(&dom, "e")).is_none());
        // Not a cell of this table.
        assert!(model.subsection(table, cell(&dom, "c")).is_none());
    }

    #[test]
    fn test_is_rectangular() {
        let (dom, table) = parse(SPANS);
        let model = TableModel::from_dom(&dom, table);
        let ids = |names: &[&str]| names.iter().map(|n| cell(&dom, n)).collect::<Vec<_>>();
        assert!(model.is_rectangular(&ids(&["c", "d", "f", "g"])));
        assert!(model.is_rectangular(&ids(&["a", "b", "c", "d"])));
        assert!(!model.is_rectangular(&ids(&["a", "d"])));
        assert!(!model.is_rectangular(&ids(&["c", "g"])));
        assert!(!model.is_rectangular(&[]));
    }

    #[test]
    fn test_to_dom_flattens_spans() {
        let (dom, table) = parse(
            "<table border=\"1\"><tr class=\"r\"><td colspan=\"2\" class=\"w\"><b>a</b></td></tr><tr><td>b</td><td>c</td></tr></table>",
        );
        let model = TableModel::from_dom(&dom, table);
        insta::assert_snapshot!(
            model.to_dom(&dom).to_html(),
            @r#"<table border="1"><tbody><tr class="r"><td class="w"><b>a</b></td><td class="w"></td></tr><tr><td>b</td><td>c</td></tr></tbody></table>"#
        );
    }

    #[test]
    fn test_tall_rowspan_section_is_linear() {
        let (dom, table) = parse(
            "<table><tr><td rowspan=\"20000\">a</td><td>b</td></tr><tr><td>c</td></tr></table>",
        );
        let started = std::time::Instant::now();
        let model = TableModel::from_dom(&dom, table);
        let a = cell(&dom, "a");
        let sub = model.rectangular_subsection(&[a]).unwrap();
        assert!(model.subsection(a, cell(&dom, "b")).is_some());
        let right = model.subsection(cell(&dom, "b"), cell(&dom, "c")).unwrap();
        assert_eq!(grid(&dom, &right), vec!["b", "c"]);
        assert!(started.elapsed() < std::time::Duration::from_secs(5));

        assert_eq!(model.rows.len(), 20000);
        assert_eq!(sub.rows.len(), 20000);
        assert_eq!(sub.width, 1);
    }
}
