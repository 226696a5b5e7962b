//! `label` elements pointing at controls.

use textloc_core::FoundType;
use textloc_document::{ElementKind, NodeId};
use textloc_pattern::SearchPattern;
use tracing::trace;

use crate::context::MatchContext;
use crate::result::MatchResult;

/// Match the text of a `label` and report the controls it labels.
///
/// A label labels the element named by its `for` attribute and every
/// control nested inside it. Only targets of the requested kind that are
/// displayed (unless invisible targets are accepted) are reported. All of
/// them share the label's coverage, distance and start.
pub fn by_html_label(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    candidate: NodeId,
) -> Vec<MatchResult> {
    let index = context.index;
    if index.kind(candidate) != Some(ElementKind::Label) || pattern.min_length() == 0 {
        return Vec::new();
    }
    let Some(spot) = index.position(candidate) else {
        return Vec::new();
    };
    if !context.anchor.precedes(spot.start) {
        return Vec::new();
    }

    let Some(coverage) = index
        .as_text_without_form_controls(candidate)
        .and_then(|text| pattern.no_of_surrounding_chars_in(&text))
    else {
        return Vec::new();
    };

    let text_before = index.text_before(candidate).unwrap_or_default();
    let length = text_before.chars().count();
    let distance = match &context.path_pattern {
        Some(path) => path
            .no_of_chars_after_last_occurence_in(&text_before)
            .unwrap_or(length),
        None => length,
    };

    let referenced = index
        .attribute(candidate, "for")
        .filter(|id| !id.is_empty())
        .and_then(|id| {
            let target = index.element_by_id(id);
            if target.is_none() {
                trace!("Label {} points at missing element '{}'", candidate, id);
            }
            target
        });

    referenced
        .into_iter()
        .chain(index.descendants(candidate))
        .filter(|&target| context.accepts_target(target))
        .map(|target| MatchResult::new(target, FoundType::ByLabel, coverage, distance, spot.start))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use textloc_document::{DocumentBuilder, DocumentIndex, ElementBuilder, TextIndex};

    use crate::control::ControlKind;

    fn index() -> DocumentIndex {
        let document = DocumentBuilder::new()
            .child(ElementBuilder::new("p").text("Personal data"))
            .child(
                ElementBuilder::new("label")
                    .id("forLabel")
                    .attr("for", "first")
                    .text("First name"),
            )
            .child(ElementBuilder::new("input").id("first"))
            .child(
                ElementBuilder::new("label")
                    .id("wrapping")
                    .text("Last name")
                    .child(ElementBuilder::new("input").id("last").attr("value", "Doe")),
            )
            .child(
                ElementBuilder::new("label")
                    .id("hiddenTarget")
                    .text("Middle name")
                    .child(ElementBuilder::new("input").id("middle").hidden()),
            )
            .build();
        DocumentIndex::new(&document)
    }

    #[test]
    fn test_label_with_for_attribute() {
        let index = index();
        let label = index.element_by_id("forLabel").unwrap();
        let context = MatchContext::parse(&index, "First");
        let pattern = context.search_pattern.as_deref().unwrap();

        let results = by_html_label(&context, pattern, label);
        assert_eq!(results.len(), 1);
        let result = &results[0];
        assert_eq!(result.element, index.element_by_id("first").unwrap());
        assert_eq!(result.found_type, FoundType::ByLabel);
        assert_eq!(result.coverage, 5);
        assert_eq!(result.distance, 13);
        assert_eq!(result.start, 13);
    }

    #[test]
    fn test_wrapping_label_ignores_control_text() {
        let index = index();
        let label = index.element_by_id("wrapping").unwrap();

        let context = MatchContext::parse(&index, "Last name");
        let pattern = context.search_pattern.as_deref().unwrap();
        let results = by_html_label(&context, pattern, label);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].element, index.element_by_id("last").unwrap());
        assert_eq!(results[0].coverage, 0);

        let context = MatchContext::parse(&index, "Personal > Last name");
        let pattern = context.search_pattern.as_deref().unwrap();
        let results = by_html_label(&context, pattern, label);
        assert_eq!(results[0].distance, 16);
    }

    #[test]
    fn test_hidden_targets() {
        let index = index();
        let label = index.element_by_id("hiddenTarget").unwrap();
        let mut context = MatchContext::parse(&index, "Middle");
        let pattern = context.search_pattern.clone().unwrap();

        assert!(by_html_label(&context, &pattern, label).is_empty());
        context.include_invisible = true;
        assert_eq!(by_html_label(&context, &pattern, label).len(), 1);
        context.kind = ControlKind::Checkbox;
        assert!(by_html_label(&context, &pattern, label).is_empty());
    }

    #[test]
    fn test_not_a_label() {
        let index = index();
        let input = index.element_by_id("first").unwrap();
        let context = MatchContext::parse(&index, "First");
        let pattern = context.search_pattern.as_deref().unwrap();
        assert!(by_html_label(&context, pattern, input).is_empty());
    }
}
