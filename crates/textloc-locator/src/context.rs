//! Everything a strategy needs besides the candidate element.

use std::sync::Arc;

use textloc_core::FindSpot;
use textloc_document::{NodeId, TextIndex};
use textloc_pattern::SearchPattern;

use crate::control::ControlKind;
use crate::path::{PathExpression, TableCoordinate};

/// Where the context segments of a path were found in the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// The expression has no context segments
    None,
    /// Context segments found at this spot
    Found(FindSpot),
    /// Context segments given but absent from the text; nothing can match
    NotFound,
}

impl Anchor {
    /// Search the path pattern in the text of an index.
    pub fn search(index: &dyn TextIndex, path_pattern: Option<&SearchPattern>) -> Self {
        match path_pattern {
            None => Anchor::None,
            Some(pattern) => {
                let spot = index.first_occurence(pattern);
                if spot.is_found() {
                    Anchor::Found(spot)
                } else {
                    Anchor::NotFound
                }
            }
        }
    }

    /// End of the anchor, if one was found.
    pub fn end(&self) -> Option<usize> {
        match self {
            Anchor::Found(spot) => Some(spot.end),
            Anchor::None | Anchor::NotFound => None,
        }
    }

    /// Whether the anchor was searched but not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Anchor::NotFound)
    }

    /// Whether something starting at `start` lies after the anchor.
    pub fn precedes(&self, start: usize) -> bool {
        match self {
            Anchor::None => true,
            Anchor::Found(spot) => spot.end <= start,
            Anchor::NotFound => false,
        }
    }

    /// Like [`Anchor::precedes`] but requires at least one character in
    /// between.
    pub fn strictly_precedes(&self, start: usize) -> bool {
        match self {
            Anchor::None => true,
            Anchor::Found(spot) => spot.end < start,
            Anchor::NotFound => false,
        }
    }
}

/// Shared, read-only inputs of one locate run.
pub struct MatchContext<'a> {
    /// The document being searched
    pub index: &'a dyn TextIndex,
    /// Pattern of the target segment; `None` when the path ends in a coordinate
    pub search_pattern: Option<Arc<SearchPattern>>,
    /// Raw context segments
    pub path_nodes: Vec<String>,
    /// Context segments joined into one pattern
    pub path_pattern: Option<Arc<SearchPattern>>,
    /// Where the context segments occur
    pub anchor: Anchor,
    /// Table coordinates, innermost first
    pub coordinates: Vec<TableCoordinate>,
    /// Kind of control being looked for
    pub kind: ControlKind,
    /// Accept targets that are not displayed
    pub include_invisible: bool,
}

impl<'a> MatchContext<'a> {
    /// Prepare a context for `expression`, compiling patterns with `compile`.
    pub fn new(
        index: &'a dyn TextIndex,
        expression: &PathExpression,
        kind: ControlKind,
        include_invisible: bool,
        compile: impl Fn(&str) -> Arc<SearchPattern>,
    ) -> Self {
        let path_nodes = expression.path_nodes().to_vec();
        // A path of wildcards only constrains nothing.
        let path_pattern = (!path_nodes.is_empty())
            .then(|| compile(&path_nodes.join("*")))
            .filter(|pattern| !pattern.is_match_all());
        let anchor = Anchor::search(index, path_pattern.as_deref());

        Self {
            index,
            search_pattern: expression.target().map(&compile),
            path_nodes,
            path_pattern,
            anchor,
            coordinates: expression.coordinates_reversed(),
            kind,
            include_invisible,
        }
    }

    /// Context for any kind of control, compiling patterns directly.
    pub fn parse(index: &'a dyn TextIndex, expression: &str) -> Self {
        Self::new(
            index,
            &PathExpression::parse(expression),
            ControlKind::Any,
            false,
            |source| Arc::new(SearchPattern::compile(source)),
        )
    }

    /// Distance of an element from the anchor: the characters after the
    /// last shortest occurrence of the path in `text_before`, or the whole
    /// length of `text_before` without a path.
    pub fn distance(&self, text_before: &str) -> usize {
        let length = text_before.chars().count();
        match &self.path_pattern {
            Some(path) => path
                .no_of_chars_after_last_shortest_occurence_in(text_before)
                .unwrap_or(length),
            None => length,
        }
    }

    /// Whether a node is an acceptable target of the requested kind.
    pub fn accepts_target(&self, node: NodeId) -> bool {
        let kind_matches = self
            .index
            .kind(node)
            .is_some_and(|kind| self.kind.accepts(kind));
        kind_matches && (self.include_invisible || self.index.is_displayed(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use textloc_document::{DocumentBuilder, DocumentIndex, ElementBuilder};

    #[test]
    fn test_anchor_search() {
        let document = DocumentBuilder::new().text("Some text .... Marker").build();
        let index = DocumentIndex::new(&document);

        assert_eq!(Anchor::search(&index, None), Anchor::None);
        let found = Anchor::search(&index, Some(&SearchPattern::compile("Marker")));
        assert_eq!(found, Anchor::Found(FindSpot::new(15, 21)));
        assert_eq!(found.end(), Some(21));
        let missing = Anchor::search(&index, Some(&SearchPattern::compile("Nothing")));
        assert!(missing.is_not_found());
        assert_eq!(missing.end(), None);
    }

    #[test]
    fn test_wildcard_path_is_unconstrained() {
        let document = DocumentBuilder::new()
            .text("Marker")
            .child(ElementBuilder::new("input").id("field"))
            .build();
        let index = DocumentIndex::new(&document);
        let context = MatchContext::parse(&index, "* > field");

        assert_eq!(context.path_nodes, ["*"]);
        assert!(context.path_pattern.is_none());
        assert_eq!(context.anchor, Anchor::None);
        assert_eq!(context.distance("Marker"), 6);
    }

    #[test]
    fn test_anchor_ordering() {
        let anchor = Anchor::Found(FindSpot::new(2, 6));
        assert!(anchor.precedes(6));
        assert!(!anchor.strictly_precedes(6));
        assert!(anchor.strictly_precedes(7));
        assert!(!anchor.precedes(5));
        assert!(Anchor::None.precedes(0));
        assert!(!Anchor::NotFound.precedes(100));
    }

    #[test]
    fn test_distance_and_target_filter() {
        let document = DocumentBuilder::new()
            .text("Marker")
            .child(ElementBuilder::new("input").id("visible"))
            .child(ElementBuilder::new("input").id("hidden").hidden())
            .build();
        let index = DocumentIndex::new(&document);
        let mut context = MatchContext::parse(&index, "Mark > [col]");
        assert_eq!(context.path_nodes, ["Mark"]);
        assert!(context.search_pattern.is_none());
        assert_eq!(context.anchor, Anchor::Found(FindSpot::new(0, 4)));
        assert_eq!(context.coordinates.len(), 1);
        context.kind = ControlKind::TextInput;

        assert_eq!(context.distance("Marker and more"), 11);
        assert_eq!(context.distance("no anchor"), 9);

        let visible = index.element_by_id("visible").unwrap();
        let hidden = index.element_by_id("hidden").unwrap();
        assert!(context.accepts_target(visible));
        assert!(!context.accepts_target(hidden));
        context.include_invisible = true;
        assert!(context.accepts_target(hidden));
        context.kind = ControlKind::Checkbox;
        assert!(!context.accepts_target(visible));
    }
}
