//! Table layout matrix honoring `rowspan` and `colspan`.

use std::collections::HashMap;

use crate::index::NodeId;

/// Upper bound for `colspan`, as browsers clamp it.
pub const MAX_COLSPAN: usize = 1000;

/// Upper bound for `rowspan`.
pub const MAX_ROWSPAN: usize = 65534;

/// Parse a span attribute; missing, zero or malformed values count as 1.
pub fn parse_span(value: Option<&str>, max: usize) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .filter(|span| *span > 0)
        .map_or(1, |span| span.min(max))
}

/// A cell as declared in its row, before layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSpec {
    /// The `td`/`th` element
    pub cell: NodeId,
    /// Columns covered, at least 1
    pub colspan: usize,
    /// Rows covered, at least 1
    pub rowspan: usize,
}

/// Slot matrix of one table.
///
/// Every slot holds the cell covering it, so a spanning cell appears in
/// several slots. Rowspans are clipped at the last row; colspans widen the
/// matrix. Slots no cell reaches stay empty.
///
/// The edge of the table is the rightmost column any cell starts in. A cell
/// spanning past the edge or past the last row is broken: it still fills its
/// slots but [`TableLayout::spans_past_edge`] reports it.
#[derive(Debug, Clone, Default)]
pub struct TableLayout {
    rows: Vec<NodeId>,
    row_cells: Vec<Vec<NodeId>>,
    /// Slots (row-major order)
    slots: Vec<Option<NodeId>>,
    width: usize,
    edge: usize,
    origins: HashMap<NodeId, (usize, usize)>,
    /// Declared `(colspan, rowspan)` per cell
    spans: HashMap<NodeId, (usize, usize)>,
}

impl TableLayout {
    /// Lay out `rows`, each given as the row element and its cells in order.
    pub fn build(rows: Vec<(NodeId, Vec<CellSpec>)>) -> Self {
        let row_count = rows.len();
        let mut matrix: Vec<Vec<Option<NodeId>>> = vec![Vec::new(); row_count];
        let mut origins = HashMap::new();
        let mut spans = HashMap::new();

        for (r, (_, cells)) in rows.iter().enumerate() {
            let mut col = 0;
            for span in cells {
                while matrix[r].get(col).copied().flatten().is_some() {
                    col += 1;
                }
                origins.insert(span.cell, (r, col));
                spans.insert(span.cell, (span.colspan, span.rowspan));

                let last_row = (r + span.rowspan).min(row_count);
                for slots in matrix.iter_mut().take(last_row).skip(r) {
                    for c in col..col + span.colspan {
                        if slots.len() <= c {
                            slots.resize(c + 1, None);
                        }
                        if slots[c].is_none() {
                            slots[c] = Some(span.cell);
                        }
                    }
                }
                col += span.colspan;
            }
        }

        let width = matrix.iter().map(Vec::len).max().unwrap_or(0);
        let edge = origins.values().map(|(_, col)| col + 1).max().unwrap_or(0);
        let mut slots = Vec::with_capacity(width * row_count);
        for mut row in matrix {
            row.resize(width, None);
            slots.extend(row);
        }

        let (row_ids, row_cells): (Vec<NodeId>, Vec<Vec<NodeId>>) = rows
            .into_iter()
            .map(|(row, cells)| {
                let cells = cells.into_iter().map(|span| span.cell).collect::<Vec<_>>();
                (row, cells)
            })
            .unzip();

        Self {
            rows: row_ids,
            row_cells,
            slots,
            width,
            edge,
            origins,
            spans,
        }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of slot columns.
    pub fn column_count(&self) -> usize {
        self.width
    }

    /// Row elements in order.
    pub fn rows(&self) -> &[NodeId] {
        &self.rows
    }

    /// Cells declared in row `row`, in document order.
    pub fn row_cells(&self, row: usize) -> &[NodeId] {
        self.row_cells.get(row).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Index of a row element.
    pub fn row_index(&self, row: NodeId) -> Option<usize> {
        self.rows.iter().position(|r| *r == row)
    }

    /// Top-left slot `(row, column)` of a cell.
    pub fn origin(&self, cell: NodeId) -> Option<(usize, usize)> {
        self.origins.get(&cell).copied()
    }

    /// Whether a cell reaches beyond the last row or the rightmost column a
    /// cell starts in.
    pub fn spans_past_edge(&self, cell: NodeId) -> bool {
        match (self.origins.get(&cell), self.spans.get(&cell)) {
            (Some((row, col)), Some((colspan, rowspan))) => {
                col + colspan > self.edge || row + rowspan > self.rows.len()
            }
            _ => false,
        }
    }

    /// The cell covering slot `(row, col)`, if any.
    ///
    /// Returns None if the slot is out of bounds or empty.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<NodeId> {
        if row < self.rows.len() && col < self.width {
            self.slots.get(row * self.width + col).copied().flatten()
        } else {
            None
        }
    }
}
