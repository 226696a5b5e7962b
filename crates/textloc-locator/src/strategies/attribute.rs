//! Strategies matching a single attribute of the candidate.

use textloc_core::FoundType;
use textloc_document::NodeId;
use textloc_pattern::SearchPattern;

use super::{score_value, MatchKind};
use crate::context::MatchContext;
use crate::result::MatchResult;

/// Match the attribute `name` of the candidate.
pub fn by_attribute(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    candidate: NodeId,
    name: &str,
    match_kind: MatchKind,
    found_type: FoundType,
) -> Option<MatchResult> {
    score_value(
        context,
        pattern,
        candidate,
        context.index.attribute(candidate, name),
        match_kind,
        found_type,
        |text| text,
    )
}

/// Match the `placeholder` of a field that has no value yet.
pub fn by_placeholder(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    candidate: NodeId,
) -> Option<MatchResult> {
    let has_value = context
        .index
        .attribute(candidate, "value")
        .is_some_and(|value| !value.is_empty());
    if has_value {
        return None;
    }
    by_attribute(
        context,
        pattern,
        candidate,
        "placeholder",
        MatchKind::Contains,
        FoundType::ByPlaceholder,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use textloc_document::{DocumentBuilder, DocumentIndex, ElementBuilder, TextIndex};

    fn index() -> DocumentIndex {
        let document = DocumentBuilder::new()
            .text("Some text .... ")
            .child(
                ElementBuilder::new("input")
                    .id("myId")
                    .attr("name", "myName")
                    .attr("placeholder", "Enter your name")
                    .attr("title", "Full name"),
            )
            .child(
                ElementBuilder::new("input")
                    .id("filled")
                    .attr("placeholder", "Enter your name")
                    .attr("value", "Jane"),
            )
            .build();
        DocumentIndex::new(&document)
    }

    #[test]
    fn test_exact_id() {
        let index = index();
        let input = index.element_by_id("myId").unwrap();

        let context = MatchContext::parse(&index, "myId");
        let result = by_attribute(
            &context,
            context.search_pattern.as_deref().unwrap(),
            input,
            "id",
            MatchKind::Exact,
            FoundType::ById,
        )
        .unwrap();
        assert_eq!(result.coverage, 0);
        assert_eq!(result.distance, 14);
        assert_eq!(result.start, 14);

        let context = MatchContext::parse(&index, "myI");
        let pattern = context.search_pattern.as_deref().unwrap();
        assert!(by_attribute(&context, pattern, input, "id", MatchKind::Exact, FoundType::ById)
            .is_none());
    }

    #[test]
    fn test_contains_title() {
        let index = index();
        let input = index.element_by_id("myId").unwrap();
        let context = MatchContext::parse(&index, "name");
        let pattern = context.search_pattern.as_deref().unwrap();

        let result = by_attribute(
            &context,
            pattern,
            input,
            "title",
            MatchKind::Contains,
            FoundType::ByTitleAttribute,
        )
        .unwrap();
        assert_eq!(result.found_type, FoundType::ByTitleAttribute);
        assert_eq!(result.coverage, 5);
    }

    #[test]
    fn test_missing_attribute() {
        let index = index();
        let input = index.element_by_id("myId").unwrap();
        let context = MatchContext::parse(&index, "anything");
        let pattern = context.search_pattern.as_deref().unwrap();
        assert!(by_attribute(
            &context,
            pattern,
            input,
            "aria-label",
            MatchKind::Contains,
            FoundType::ByAriaLabelAttribute
        )
        .is_none());
    }

    #[test]
    fn test_empty_pattern_never_matches() {
        let index = index();
        let input = index.element_by_id("myId").unwrap();
        let context = MatchContext::parse(&index, "*");
        let pattern = context.search_pattern.as_deref().unwrap();
        assert!(by_attribute(&context, pattern, input, "id", MatchKind::Exact, FoundType::ById)
            .is_none());
    }

    #[test]
    fn test_placeholder_only_without_value() {
        let index = index();
        let empty = index.element_by_id("myId").unwrap();
        let filled = index.element_by_id("filled").unwrap();
        let context = MatchContext::parse(&index, "your name");
        let pattern = context.search_pattern.as_deref().unwrap();

        let result = by_placeholder(&context, pattern, empty).unwrap();
        assert_eq!(result.found_type, FoundType::ByPlaceholder);
        assert_eq!(result.coverage, 6);
        assert!(by_placeholder(&context, pattern, filled).is_none());
    }

    #[test]
    fn test_anchor_after_element() {
        let index = index();
        let input = index.element_by_id("myId").unwrap();
        let context = MatchContext::parse(&index, "Some text > myId");
        let pattern = context.search_pattern.as_deref().unwrap();
        let result =
            by_attribute(&context, pattern, input, "id", MatchKind::Exact, FoundType::ById).unwrap();
        assert_eq!(result.distance, 5);

        let context = MatchContext::parse(&index, "Missing > myId");
        let pattern = context.search_pattern.as_deref().unwrap();
        assert!(by_attribute(&context, pattern, input, "id", MatchKind::Exact, FoundType::ById)
            .is_none());
        assert!(index.position(input).is_some());
    }
}
