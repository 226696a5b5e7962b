//! Table coordinates.
//!
//! A coordinate `[column; row]` holds when some cell in the candidate's
//! column matches `column` and some cell in its row matches `row`. Header
//! cells have to come after the anchor. When the innermost table does not
//! satisfy a coordinate, the tables enclosing it are tried in turn; the next
//! coordinate then continues from the row that satisfied the previous one.
//! A cell spanning past the edge of its table satisfies no coordinate there.

use textloc_core::FoundType;
use textloc_document::{NodeId, TextIndex};
use textloc_pattern::SearchPattern;
use tracing::trace;

use crate::context::{Anchor, MatchContext};
use crate::path::TableCoordinate;
use crate::result::MatchResult;

/// Match a candidate by its table position alone.
///
/// Used for expressions that end in a coordinate, e.g.
/// `"[Name; Row 2]"`; coverage is always 0.
pub fn by_table_coordinates(context: &MatchContext<'_>, candidate: NodeId) -> Option<MatchResult> {
    if !context.accepts_target(candidate) || context.anchor.is_not_found() {
        return None;
    }

    let spot = context.index.position(candidate)?;
    if !context.anchor.precedes(spot.start) {
        return None;
    }
    if !is_in_table_coordinates(context.index, candidate, &context.coordinates, context.anchor) {
        return None;
    }

    let text_before = context.index.text_before(candidate)?;
    Some(MatchResult::new(
        candidate,
        FoundType::ByTableCoordinate,
        0,
        context.distance(&text_before),
        spot.start,
    ))
}

/// Whether `element` lies at all `coordinates`, innermost first.
pub fn is_in_table_coordinates(
    index: &dyn TextIndex,
    element: NodeId,
    coordinates: &[TableCoordinate],
    anchor: Anchor,
) -> bool {
    let mut current = element;
    let mut found = true;

    for coordinate in coordinates {
        if !found {
            break;
        }
        found = false;

        let Some(mut cell) = index.enclosing_cell(current) else {
            break;
        };
        let column_pattern = coordinate.column_pattern();
        let row_pattern = coordinate.row_pattern();
        let mut found_column = false;
        let mut found_row = false;

        loop {
            let Some((row, table)) = index
                .enclosing_row(cell)
                .and_then(|row| Some((row, index.enclosing_table(row)?)))
            else {
                break;
            };

            let broken = index.spans_past_edge(cell);
            if broken {
                trace!("Cell {} spans past the edge of table {}", cell, table);
            } else {
                if let Some(pattern) = column_pattern.as_ref().filter(|_| !found_column) {
                    found_column = column_matches(index, table, cell, pattern, anchor);
                }
                if let Some(pattern) = row_pattern.as_ref().filter(|_| !found_row) {
                    found_row = row_matches(index, table, row, cell, pattern, anchor);
                }
            }

            if !broken
                && (found_column || column_pattern.is_none())
                && (found_row || row_pattern.is_none())
            {
                trace!("Element {} satisfies {} in table {}", element, coordinate, table);
                found = true;
                current = row;
                break;
            }

            match index.enclosing_cell(row) {
                Some(outer) => cell = outer,
                None => break,
            }
        }
    }

    found
}

/// Some cell sharing a column with `cell` matches the column pattern.
fn column_matches(
    index: &dyn TextIndex,
    table: NodeId,
    cell: NodeId,
    pattern: &SearchPattern,
    anchor: Anchor,
) -> bool {
    let Some(first) = index.cell_index_in_row(cell) else {
        return false;
    };
    let last = first.saturating_add(index.colspan(cell));
    let rows = index.row_count(table);

    (first..last).any(|column| {
        (0..rows).any(|row| {
            index
                .cell_at(table, row, column)
                .is_some_and(|header| is_header(index, header, pattern, anchor))
        })
    })
}

/// Some cell sharing a row with `cell` matches the row pattern.
fn row_matches(
    index: &dyn TextIndex,
    table: NodeId,
    row: NodeId,
    cell: NodeId,
    pattern: &SearchPattern,
    anchor: Anchor,
) -> bool {
    let Some(first) = index.row_index_in_table(row) else {
        return false;
    };
    let rows = index.row_count(table);
    let last = first.saturating_add(index.rowspan(cell)).min(rows);
    let columns = index.column_count(table);

    (first..last).any(|row| {
        (0..columns).any(|column| {
            index
                .cell_at(table, row, column)
                .is_some_and(|header| is_header(index, header, pattern, anchor))
        })
    })
}

fn is_header(index: &dyn TextIndex, cell: NodeId, pattern: &SearchPattern, anchor: Anchor) -> bool {
    let Some(spot) = index.position(cell) else {
        return false;
    };
    anchor.strictly_precedes(spot.start)
        && index
            .as_text(cell)
            .is_some_and(|text| pattern.matches(&text))
}
