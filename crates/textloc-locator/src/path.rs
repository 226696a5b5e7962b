//! Path expressions: `context > context > target` with optional table
//! coordinates `[column; row]`.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use textloc_core::{Error, Result};
use textloc_pattern::SearchPattern;

lazy_static! {
    /// A whole segment wrapped in brackets.
    static ref COORDINATE: Regex = Regex::new(r"^\[(?s)(.*)\]$").unwrap();
    /// An escaped path separator.
    static ref ESCAPED_SEPARATOR: Regex = Regex::new(r"\\>").unwrap();
}

/// One table coordinate: a column label and a row label, either optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCoordinate {
    /// Text of a cell labeling the column (usually a header)
    pub column: Option<String>,
    /// Text of a cell labeling the row (usually the first cell)
    pub row: Option<String>,
    /// More than two `;`-separated parts were given; extra parts are ignored
    #[serde(skip)]
    overflow: bool,
}

impl TableCoordinate {
    /// Create a coordinate from its two axes.
    pub fn new(column: Option<&str>, row: Option<&str>) -> Self {
        Self {
            column: column.map(str::to_string),
            row: row.map(str::to_string),
            overflow: false,
        }
    }

    /// Parse the content between the brackets.
    ///
    /// Without `;` the whole content is the column. Blank sides mean "any".
    fn parse(content: &str) -> Self {
        let non_blank = |part: &str| {
            let part = part.trim();
            (!part.is_empty()).then(|| part.to_string())
        };

        let mut parts = content.split(';');
        let column = parts.next().and_then(non_blank);
        let row = parts.next().and_then(non_blank);
        Self {
            column,
            row,
            overflow: parts.next().is_some(),
        }
    }

    /// Compiled column pattern, if the column axis is constrained.
    pub fn column_pattern(&self) -> Option<SearchPattern> {
        self.column.as_deref().map(SearchPattern::compile)
    }

    /// Compiled row pattern, if the row axis is constrained.
    pub fn row_pattern(&self) -> Option<SearchPattern> {
        self.row.as_deref().map(SearchPattern::compile)
    }
}

impl fmt::Display for TableCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{};{}]",
            self.column.as_deref().unwrap_or(""),
            self.row.as_deref().unwrap_or("")
        )
    }
}

/// A parsed locator expression.
///
/// `"Username > [Name; Row 2] > Edit"` yields the path node `Username`, one
/// table coordinate and the target `Edit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathExpression {
    raw: Vec<String>,
    path_nodes: Vec<String>,
    coordinates: Vec<TableCoordinate>,
    target: Option<String>,
    /// Coordinate groups interrupted by a plain segment
    #[serde(skip)]
    split_coordinates: bool,
}

impl PathExpression {
    /// Parse an expression. Parsing never fails; see [`PathExpression::validate`].
    pub fn parse(expression: &str) -> Self {
        let raw: Vec<String> = split_segments(expression)
            .into_iter()
            .map(|segment| ESCAPED_SEPARATOR.replace_all(segment.trim(), ">").into_owned())
            .collect();
        Self::from_segments(raw)
    }

    /// Build an expression from already split segments.
    pub fn from_segments(raw: Vec<String>) -> Self {
        let mut path_nodes = Vec::new();
        let mut coordinates = Vec::new();
        let mut split_coordinates = false;
        let mut coordinates_finished = false;

        let (last, leading) = match raw.split_last() {
            Some((last, leading)) => (Some(last), leading),
            None => (None, &[][..]),
        };

        for segment in leading {
            match coordinate_content(segment) {
                Some(content) => {
                    if coordinates_finished {
                        split_coordinates = true;
                    }
                    coordinates.push(TableCoordinate::parse(content));
                }
                None => {
                    if !coordinates.is_empty() {
                        coordinates_finished = true;
                    }
                    path_nodes.push(segment.clone());
                }
            }
        }

        let target = match last {
            Some(segment) => match coordinate_content(segment) {
                Some(content) => {
                    if coordinates_finished {
                        split_coordinates = true;
                    }
                    coordinates.push(TableCoordinate::parse(content));
                    None
                }
                None => Some(segment.clone()),
            },
            None => None,
        };

        Self {
            raw,
            path_nodes,
            coordinates,
            target,
            split_coordinates,
        }
    }

    /// Reject expressions the locator cannot interpret unambiguously.
    pub fn validate(&self) -> Result<()> {
        if self.split_coordinates {
            return Err(Error::InvalidPath(format!(
                "'{self}': only one group of table coordinates allowed"
            )));
        }
        if let Some(coordinate) = self.coordinates.iter().find(|c| c.overflow) {
            return Err(Error::InvalidPath(format!(
                "'{coordinate}' is not a valid table coordinate"
            )));
        }
        Ok(())
    }

    /// All segments as written.
    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    /// Context segments preceding the target.
    pub fn path_nodes(&self) -> &[String] {
        &self.path_nodes
    }

    /// Table coordinates, outermost first.
    pub fn coordinates(&self) -> &[TableCoordinate] {
        &self.coordinates
    }

    /// Table coordinates, innermost first, the order they are evaluated in.
    pub fn coordinates_reversed(&self) -> Vec<TableCoordinate> {
        self.coordinates.iter().rev().cloned().collect()
    }

    /// The target segment; `None` when the expression ends in a coordinate.
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Whether the expression has no segments at all.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// The context segments joined into one pattern, if there are any.
    pub fn path_pattern(&self) -> Option<SearchPattern> {
        (!self.path_nodes.is_empty()).then(|| SearchPattern::create_from_list(&self.path_nodes))
    }
}

impl fmt::Display for PathExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw.join(" > "))
    }
}

/// Split on `>` unless it is escaped by a backslash.
///
/// A run of backslashes escapes the `>` only when its length is odd;
/// `\\>` is an escaped backslash followed by a separator.
fn split_segments(expression: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut begin = 0;
    let mut backslashes = 0;
    for (i, c) in expression.char_indices() {
        match c {
            '\\' => backslashes += 1,
            '>' if backslashes % 2 == 0 => {
                segments.push(&expression[begin..i]);
                begin = i + 1;
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
    }
    segments.push(&expression[begin..]);
    segments
}

fn coordinate_content(segment: &str) -> Option<&str> {
    if segment.ends_with("\\]") {
        return None;
    }
    COORDINATE
        .captures(segment)
        .and_then(|captures| captures.get(1))
        .map(|content| content.as_str())
}
