//! # textloc-locator
//!
//! Locator strategies for textloc.
//!
//! This crate provides:
//! - The path expression parser (`"Context > [column; row] > target"`)
//! - The closed set of locator strategies scoring candidates by coverage,
//!   distance and start
//! - Table-coordinate matching honoring nested tables
//! - Ranking of the collected matches
//! - The [`Locator`] pipeline tying it all together
//!
//! ## Architecture
//!
//! This is Layer 3 in the architecture - it depends on textloc-core,
//! textloc-pattern and textloc-document and only sees documents through
//! the [`textloc_document::TextIndex`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregation;
pub mod context;
pub mod control;
pub mod locator;
pub mod path;
pub mod result;
pub mod strategies;

// Re-export commonly used types
pub use aggregation::{RankedMatch, WeightedMatchList};
pub use context::{Anchor, MatchContext};
pub use control::{strategies_for, ControlKind};
pub use locator::Locator;
pub use path::{PathExpression, TableCoordinate};
pub use result::MatchResult;
pub use strategies::{is_in_table_coordinates, MatchKind, Strategy};
