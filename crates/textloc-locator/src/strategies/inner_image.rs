//! Images nested in buttons and links.

use textloc_core::FoundType;
use textloc_document::{ElementKind, NodeId};
use textloc_pattern::SearchPattern;

use super::{score_value, MatchKind};
use crate::context::MatchContext;
use crate::result::MatchResult;

/// Image attributes checked, in order.
const IMAGE_RULES: [(&str, MatchKind, FoundType); 4] = [
    ("alt", MatchKind::Contains, FoundType::ByInnerImgAltAttribute),
    ("title", MatchKind::Contains, FoundType::ByInnerImgTitleAttribute),
    ("src", MatchKind::EndsWith, FoundType::ByInnerImgSrcAttribute),
    ("name", MatchKind::Exact, FoundType::ByInnerName),
];

/// Match the attributes of every image inside the candidate.
///
/// Values come from the image, but the result describes the candidate:
/// position and distance are those of the enclosing control.
pub fn by_inner_image(
    context: &MatchContext<'_>,
    pattern: &SearchPattern,
    candidate: NodeId,
) -> Vec<MatchResult> {
    let index = context.index;
    index
        .descendants(candidate)
        .into_iter()
        .filter(|&node| index.kind(node) == Some(ElementKind::Image))
        .flat_map(|image| {
            IMAGE_RULES
                .into_iter()
                .filter_map(move |(name, match_kind, found_type)| {
                    score_value(
                        context,
                        pattern,
                        candidate,
                        index.attribute(image, name),
                        match_kind,
                        found_type,
                        |text| text,
                    )
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use textloc_document::{DocumentBuilder, DocumentIndex, ElementBuilder, TextIndex};

    fn index() -> DocumentIndex {
        let document = DocumentBuilder::new()
            .text("Some text .... ")
            .child(
                ElementBuilder::new("button").id("btn").child(
                    ElementBuilder::new("img")
                        .attr("src", "web/picture.png")
                        .attr("alt", "A picture of a cat")
                        .attr("title", "Cat picture")
                        .attr("name", "catImage"),
                ),
            )
            .child(ElementBuilder::new("a").id("plain").text("no image"))
            .build();
        DocumentIndex::new(&document)
    }

    fn found_types(results: &[MatchResult]) -> Vec<FoundType> {
        results.iter().map(|r| r.found_type).collect()
    }

    #[test]
    fn test_inner_image_attributes() {
        let index = index();
        let button = index.element_by_id("btn").unwrap();

        let context = MatchContext::parse(&index, "picture");
        let pattern = context.search_pattern.as_deref().unwrap();
        let results = by_inner_image(&context, pattern, button);
        assert_eq!(
            found_types(&results),
            vec![FoundType::ByInnerImgAltAttribute, FoundType::ByInnerImgTitleAttribute]
        );
        assert!(results.iter().all(|r| r.element == button));
        assert!(results.iter().all(|r| r.distance == 14 && r.start == 14));

        let context = MatchContext::parse(&index, "picture.png");
        let pattern = context.search_pattern.as_deref().unwrap();
        let results = by_inner_image(&context, pattern, button);
        assert_eq!(found_types(&results), vec![FoundType::ByInnerImgSrcAttribute]);
        assert_eq!(results[0].coverage, 4);

        let context = MatchContext::parse(&index, "catImage");
        let pattern = context.search_pattern.as_deref().unwrap();
        let results = by_inner_image(&context, pattern, button);
        assert_eq!(found_types(&results), vec![FoundType::ByInnerName]);
        assert_eq!(results[0].coverage, 0);
    }

    #[test]
    fn test_without_images() {
        let index = index();
        let link = index.element_by_id("plain").unwrap();
        let context = MatchContext::parse(&index, "image");
        let pattern = context.search_pattern.as_deref().unwrap();
        assert!(by_inner_image(&context, pattern, link).is_empty());
    }
}
