//! # textloc-document
//!
//! Document model and flattened text index for textloc.
//!
//! This crate provides:
//! - A serializable document tree (elements, attributes, text, visibility)
//! - Whitespace-normalized text rendering with per-node positions
//! - The [`TextIndex`] query trait and its [`DocumentIndex`] implementation
//! - Table layout honoring `rowspan`/`colspan`
//! - A fluent [`DocumentBuilder`] for tests and benches
//!
//! ## Architecture
//!
//! This is Layer 2 in the architecture - it depends on textloc-core and
//! textloc-pattern and is the only view locator strategies get of a
//! document.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod document;
pub mod index;
pub mod kind;
pub mod normalized;
pub mod table;

// Re-export commonly used types
pub use builder::{DocumentBuilder, ElementBuilder};
pub use document::{Document, Node};
pub use index::{DocumentIndex, NodeId, TextIndex};
pub use kind::{ElementKind, InputType};
pub use normalized::NormalizedText;
pub use table::TableLayout;
